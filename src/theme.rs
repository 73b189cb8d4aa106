use egui::{Color32, CornerRadius, Stroke};

/// Gauge value at which the score ring is full.
pub const GAUGE_FULL_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Top,
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn of(score: f64) -> Self {
        if score >= 3.0 {
            ScoreTier::Top
        } else if score >= 1.5 {
            ScoreTier::High
        } else if score >= 0.5 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

/// Share of the gauge ring to fill for `score`.
pub fn gauge_fraction(score: f64) -> f32 {
    (score / GAUGE_FULL_SCORE).clamp(0.0, 1.0) as f32
}

pub struct AppTheme {
    pub background: Color32,
    pub card_background: Color32,
    pub text: Color32,
    pub secondary_text: Color32,
    pub highlight: Color32,
    pub accent: Color32,
    pub separator: Color32,
    pub error: Color32,
    pub saved: Color32,
    pub score_high: Color32,
    pub score_medium: Color32,
    pub score_low: Color32,
    pub link_color: Color32,
    pub button_background: Color32,
    pub button_foreground: Color32,
    pub button_active_background: Color32,
    pub button_hover_background: Color32,
}

impl AppTheme {
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(17, 24, 39),
            card_background: Color32::from_rgb(31, 41, 55),
            text: Color32::from_rgb(243, 244, 246),
            secondary_text: Color32::from_rgb(156, 163, 175),
            highlight: Color32::from_rgb(74, 222, 128), // scout green
            accent: Color32::from_rgb(96, 165, 250),
            separator: Color32::from_rgb(55, 65, 81),
            error: Color32::from_rgb(248, 113, 113),
            saved: Color32::from_rgb(202, 138, 4),
            score_high: Color32::from_rgb(74, 222, 128),
            score_medium: Color32::from_rgb(250, 204, 21),
            score_low: Color32::from_rgb(156, 163, 175),
            link_color: Color32::from_rgb(96, 165, 250),
            button_background: Color32::from_rgb(55, 65, 81),
            button_foreground: Color32::from_rgb(243, 244, 246),
            button_active_background: Color32::from_rgb(22, 163, 74),
            button_hover_background: Color32::from_rgb(75, 85, 99),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(245, 245, 245),
            card_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(20, 20, 20),
            secondary_text: Color32::from_rgb(90, 90, 90),
            highlight: Color32::from_rgb(21, 128, 61),
            accent: Color32::from_rgb(29, 78, 216),
            separator: Color32::from_rgb(200, 200, 200),
            error: Color32::from_rgb(185, 28, 28),
            saved: Color32::from_rgb(161, 98, 7),
            score_high: Color32::from_rgb(30, 110, 40),
            score_medium: Color32::from_rgb(190, 130, 0),
            score_low: Color32::from_rgb(80, 80, 80),
            link_color: Color32::from_rgb(20, 100, 200),
            button_background: Color32::from_rgb(235, 235, 235),
            button_foreground: Color32::from_rgb(20, 20, 20),
            button_active_background: Color32::from_rgb(21, 128, 61),
            button_hover_background: Color32::from_rgb(210, 210, 210),
        }
    }

    pub fn for_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    fn is_dark(&self) -> bool {
        self.background.r() <= 128 || self.background.g() <= 128 || self.background.b() <= 128
    }

    pub fn apply_to_ctx(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals.dark_mode = self.is_dark();
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.card_background;
        style.visuals.window_stroke = Stroke::new(1.0, self.separator);
        style.visuals.extreme_bg_color = self.card_background;
        style.visuals.hyperlink_color = self.link_color;
        style.visuals.widgets.noninteractive.bg_fill = self.card_background;
        style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);

        style.visuals.widgets.inactive.bg_fill = self.button_background;
        style.visuals.widgets.inactive.weak_bg_fill = self.button_background;
        style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.active.bg_fill = self.button_active_background;
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.hovered.bg_fill = self.button_hover_background;
        style.visuals.widgets.hovered.weak_bg_fill = self.button_hover_background;
        style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.button_foreground);

        style.visuals.selection.bg_fill = self.highlight;
        style.visuals.selection.stroke = Stroke::new(1.0, self.highlight);

        style.visuals.window_corner_radius = CornerRadius::same(8);
        style.visuals.menu_corner_radius = CornerRadius::same(6);
        style.visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.active.corner_radius = CornerRadius::same(4);

        ctx.set_style(style);
    }

    pub fn score_color(&self, score: f64) -> Color32 {
        match ScoreTier::of(score) {
            ScoreTier::Top | ScoreTier::High => self.score_high,
            ScoreTier::Medium => self.score_medium,
            ScoreTier::Low => self.score_low,
        }
    }

    pub fn card_background(&self, score: f64) -> Color32 {
        let dark = self.is_dark();
        match ScoreTier::of(score) {
            ScoreTier::Top if dark => Color32::from_rgb(34, 60, 45),
            ScoreTier::Top => Color32::from_rgb(240, 250, 240),
            ScoreTier::High if dark => Color32::from_rgb(
                self.card_background.r().saturating_add(5),
                self.card_background.g().saturating_add(15),
                self.card_background.b().saturating_add(5),
            ),
            ScoreTier::High => Color32::from_rgb(
                self.card_background.r().saturating_sub(5),
                self.card_background.g(),
                self.card_background.b().saturating_sub(5),
            ),
            _ => self.card_background,
        }
    }

    pub fn card_stroke(&self, score: f64, saved: bool) -> Stroke {
        if saved {
            return Stroke::new(2.0, self.saved);
        }
        match ScoreTier::of(score) {
            ScoreTier::Top => Stroke::new(2.0, self.score_high),
            ScoreTier::High => Stroke::new(1.5, self.score_high.gamma_multiply(0.6)),
            ScoreTier::Medium => Stroke::new(1.2, self.score_medium.gamma_multiply(0.5)),
            ScoreTier::Low => Stroke::new(1.0, self.separator),
        }
    }
}
