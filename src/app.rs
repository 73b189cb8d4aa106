use eframe::egui;
use egui::{Color32, CornerRadius, RichText, ScrollArea, Stroke, Ui};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, warn};

use crate::bookmarks::BookmarkStore;
use crate::comment_html;
use crate::domains::{domain_of, suggest_domains};
use crate::error::{ListingError, ScoutError};
use crate::hn_client::{HnApi, PageRequest, HITS_PER_PAGE};
use crate::item::load_item;
use crate::listing::{load_listing, Feed, FeedState, InitialPage};
use crate::models::{time_ago, ItemView, SearchPage, Story};
use crate::routes::{filter_route, FilterEvent, ListingQuery, Route, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS};
use crate::theme::{gauge_fraction, AppTheme};

/// Results sent back from worker threads. `generation` ties each one to the
/// navigation that started it.
enum LoadResult {
    Listing {
        generation: u64,
        query: ListingQuery,
        result: Result<InitialPage, ListingError>,
    },
    NextPage {
        generation: u64,
        result: Result<SearchPage, ScoutError>,
    },
    Item {
        generation: u64,
        result: Result<ItemView, ScoutError>,
    },
}

enum ListingView {
    Loading,
    Failed(String),
    Ready(Feed),
}

enum ItemPage {
    Loading,
    Failed(String),
    Ready(ItemView),
}

enum View {
    Listing(ListingView),
    Item(ItemPage),
    NotFound(String),
}

/// Things the user did this frame, applied once rendering is done.
enum UiAction {
    Navigate(Route),
    Reload,
    ToggleSaved(String),
    OpenLink(String),
    CopyLink(String),
}

pub struct ScoutApp {
    api: Arc<dyn HnApi>,
    bookmarks: BookmarkStore,
    ctx: egui::Context,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    generation: u64,
    route: Route,
    last_listing: Route,
    view: View,
    theme: AppTheme,
    is_dark_mode: bool,
    address: String,
    domain_input: String,
    time_window: u32,
    show_saved_panel: bool,
    saved_ids: Vec<String>,
    stories_scroll_offset: f32,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl ScoutApp {
    pub fn new(
        ctx: egui::Context,
        api: Arc<dyn HnApi>,
        bookmarks: BookmarkStore,
        initial_route: Route,
        is_dark_mode: bool,
    ) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            api,
            bookmarks,
            ctx,
            tx,
            rx,
            generation: 0,
            route: Route::first_page(ListingQuery::default()),
            last_listing: Route::first_page(ListingQuery::default()),
            view: View::Listing(ListingView::Loading),
            theme: AppTheme::for_mode(is_dark_mode),
            is_dark_mode,
            address: String::new(),
            domain_input: String::new(),
            time_window: ListingQuery::default().window_days,
            show_saved_panel: false,
            saved_ids: Vec::new(),
            stories_scroll_offset: 0.0,
        };
        app.reload_saved_ids();
        app.navigate(initial_route);
        app
    }

    fn navigate(&mut self, route: Route) {
        self.generation += 1;
        self.address = route.to_path();
        self.route = route.clone();
        debug!(path = %self.address, generation = self.generation, "Navigate");

        match route {
            Route::Listing { page, query } => {
                self.last_listing = self.route.clone();
                self.domain_input = query.domain.clone().unwrap_or_default();
                self.time_window = query.window_days;
                self.stories_scroll_offset = 0.0;
                self.view = View::Listing(ListingView::Loading);

                let generation = self.generation;
                let started_at = now();
                self.spawn_load(move |api| LoadResult::Listing {
                    generation,
                    result: load_listing(api, page, &query, started_at, now),
                    query,
                });
            }
            Route::Item { id } => {
                self.view = View::Item(ItemPage::Loading);
                let generation = self.generation;
                self.spawn_load(move |api| LoadResult::Item {
                    generation,
                    result: load_item(api, &id),
                });
            }
            Route::NotFound { path } => {
                warn!(path = %path, "No route matches");
                self.view = View::NotFound(path);
            }
        }
    }

    fn spawn_load<F>(&self, job: F)
    where
        F: FnOnce(&dyn HnApi) -> LoadResult + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        thread::spawn(move || {
            let result = job(api.as_ref());
            // receiver is gone only when the app is closing
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn spawn_next_page(&self, request: PageRequest) {
        let generation = self.generation;
        self.spawn_load(move |api| LoadResult::NextPage {
            generation,
            result: api.search_page(&request),
        });
    }

    fn check_loading_threads(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                LoadResult::Listing {
                    generation,
                    query,
                    result,
                } => {
                    if !self.accepts(generation) {
                        debug!(generation, "Dropping stale listing result");
                        continue;
                    }
                    self.view = View::Listing(match result {
                        Ok(initial) => {
                            let mut feed = Feed::new(query, initial);
                            let saved = &self.saved_ids;
                            feed.apply_saved(|id| saved.iter().any(|s| s == id));
                            ListingView::Ready(feed)
                        }
                        Err(e) => {
                            error!(error = %e, path = %self.address, "Failed to load listing");
                            ListingView::Failed(e.to_string())
                        }
                    });
                }
                LoadResult::NextPage { generation, result } => {
                    if !self.accepts(generation) {
                        debug!(generation, "Dropping stale page result");
                        continue;
                    }
                    if let View::Listing(ListingView::Ready(feed)) = &mut self.view {
                        feed.complete(result, now());
                        let saved = &self.saved_ids;
                        feed.apply_saved(|id| saved.iter().any(|s| s == id));
                    }
                }
                LoadResult::Item { generation, result } => {
                    if !self.accepts(generation) {
                        debug!(generation, "Dropping stale item result");
                        continue;
                    }
                    self.view = View::Item(match result {
                        Ok(item) => ItemPage::Ready(item),
                        Err(e) => {
                            error!(error = %e, path = %self.address, "Failed to load item");
                            ItemPage::Failed(e.to_string())
                        }
                    });
                }
            }
        }
    }

    /// Only results started by the latest navigation may touch the view.
    fn accepts(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn reload_saved_ids(&mut self) {
        match self.bookmarks.saved_ids() {
            Ok(ids) => self.saved_ids = ids,
            Err(e) => error!(error = %e, "Error loading saved posts"),
        }
    }

    fn is_saved(&self, id: &str) -> bool {
        self.saved_ids.iter().any(|s| s == id)
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Navigate(route) => self.navigate(route),
            UiAction::Reload => self.navigate(self.route.clone()),
            UiAction::ToggleSaved(id) => {
                match self.bookmarks.toggle(&id) {
                    Ok(saved) => debug!(id = %id, saved, "Toggled saved status"),
                    Err(e) => error!(error = %e, id = %id, "Error toggling saved status"),
                }
                self.reload_saved_ids();
                if let View::Listing(ListingView::Ready(feed)) = &mut self.view {
                    let saved = &self.saved_ids;
                    feed.apply_saved(|id| saved.iter().any(|s| s == id));
                }
            }
            UiAction::OpenLink(url) => {
                if let Err(e) = open::that(&url) {
                    error!(error = %e, url = %url, "Failed to open URL");
                }
            }
            UiAction::CopyLink(url) => {
                if let Err(e) = copy_to_clipboard(&url) {
                    error!(error = %e, "Failed to copy link");
                }
            }
        }
    }

    fn current_query(&self) -> ListingQuery {
        match &self.route {
            Route::Listing { query, .. } => query.clone(),
            _ => ListingQuery::new(self.time_window, None),
        }
    }

    fn toggle_theme(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
        self.theme = AppTheme::for_mode(self.is_dark_mode);
    }

    fn round_button(&self, ui: &mut Ui, label: &str, active: bool) -> egui::Response {
        let response = ui.add(
            egui::Button::new(
                RichText::new(label)
                    .color(if active { self.theme.highlight } else { self.theme.button_foreground })
                    .size(18.0),
            )
            .min_size(egui::Vec2::new(32.0, 32.0))
            .corner_radius(CornerRadius::same(16))
            .fill(self.theme.button_background),
        );
        if response.hovered() {
            ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
        }
        response
    }

    fn render_header(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            let panel_btn = self.round_button(ui, "☰", self.show_saved_panel);
            if panel_btn.clicked() {
                self.show_saved_panel = !self.show_saved_panel;
                if self.show_saved_panel {
                    self.reload_saved_ids();
                }
            }
            panel_btn.on_hover_text("Saved posts");

            ui.add_space(8.0);
            ui.heading(
                RichText::new("HN SCOUT")
                    .color(self.theme.highlight)
                    .size(24.0)
                    .strong(),
            );
            ui.add_space(16.0);

            let address = ui.add(
                egui::TextEdit::singleline(&mut self.address)
                    .desired_width(280.0)
                    .hint_text("/1?time=30"),
            );
            if address.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(UiAction::Navigate(Route::parse(&self.address)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_icon = if self.is_dark_mode { "☀" } else { "☾" };
                let theme_btn = self.round_button(ui, theme_icon, false);
                if theme_btn.clicked() {
                    self.toggle_theme();
                }
                theme_btn.on_hover_text(if self.is_dark_mode {
                    "Switch to Light Mode"
                } else {
                    "Switch to Dark Mode"
                });

                ui.add_space(8.0);
                let refresh_btn = self.round_button(ui, "↻", false);
                if refresh_btn.clicked() {
                    actions.push(UiAction::Reload);
                }
                refresh_btn.on_hover_text("Reload");
            });
        });
    }

    fn render_saved_panel(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::SidePanel::left("saved_panel")
            .resizable(true)
            .default_width(280.0)
            .width_range(220.0..=400.0)
            .show_animated(ctx, self.show_saved_panel, |ui| {
                ui.add_space(8.0);
                ui.heading(RichText::new("Saved Posts").size(20.0).color(self.theme.highlight));
                ui.add(egui::Separator::default().spacing(8.0));

                if self.saved_ids.is_empty() {
                    ui.label(RichText::new("No saved posts.").color(self.theme.secondary_text));
                    return;
                }

                let loaded: Vec<&Story> = match &self.view {
                    View::Listing(ListingView::Ready(feed)) => {
                        feed.stories().iter().filter(|s| self.is_saved(&s.id)).collect()
                    }
                    _ => Vec::new(),
                };

                ScrollArea::vertical().id_salt("saved_scroll_area").show(ui, |ui| {
                    for story in &loaded {
                        let link = ui.add(
                            egui::Label::new(RichText::new(&story.title).color(self.theme.link_color))
                                .sense(egui::Sense::click()),
                        );
                        if link.clicked() {
                            actions.push(UiAction::Navigate(Route::Item { id: story.id.clone() }));
                        }
                        ui.add_space(4.0);
                    }

                    let others: Vec<&String> = self
                        .saved_ids
                        .iter()
                        .filter(|id| !loaded.iter().any(|s| &s.id == *id))
                        .collect();
                    if !others.is_empty() {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new("Not in this listing")
                                .color(self.theme.secondary_text)
                                .italics(),
                        );
                        for id in others {
                            if ui.link(format!("#{id}")).clicked() {
                                actions.push(UiAction::Navigate(Route::Item { id: id.clone() }));
                            }
                        }
                    }
                });
            });
    }

    fn render_filters(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let query = self.current_query();

        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.domain_input)
                    .desired_width(320.0)
                    .hint_text("Filter by domain (e.g., medium.com)"),
            );
            let mut events = Vec::new();
            if input.changed() {
                events.push(FilterEvent::InputEdited);
            }
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Apply").clicked() || submitted {
                events.push(FilterEvent::Applied);
            }

            ui.add_space(24.0);
            ui.label(RichText::new("Time Filter:").color(self.theme.secondary_text));
            let slider = ui.add(
                egui::Slider::new(&mut self.time_window, MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).suffix("d"),
            );
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                events.push(FilterEvent::WindowChanged);
            }

            for event in events {
                if let Some(route) = filter_route(event, &self.domain_input, &query, self.time_window) {
                    actions.push(UiAction::Navigate(route));
                }
            }
        });

        // suggestions come from everything loaded so far
        if let View::Listing(ListingView::Ready(feed)) = &self.view {
            let typed = self.domain_input.trim();
            if query.domain.as_deref() != Some(typed) {
                let suggestions = suggest_domains(feed.stories(), typed);
                for suggestion in suggestions {
                    if ui
                        .selectable_label(false, RichText::new(&suggestion).color(self.theme.text))
                        .clicked()
                    {
                        if let Some(route) =
                            filter_route(FilterEvent::Applied, &suggestion, &query, self.time_window)
                        {
                            actions.push(UiAction::Navigate(route));
                        }
                    }
                }
            }
        }

        if let Some(domain) = &query.domain {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Showing results for \"{domain}\""))
                    .color(self.theme.accent),
            );
        }
    }

    fn render_listing(&mut self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        self.render_filters(ui, actions);
        ui.add_space(8.0);

        let feed = match &self.view {
            View::Listing(ListingView::Loading) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                    ui.label(RichText::new("Loading stories...").color(self.theme.secondary_text));
                });
                return;
            }
            View::Listing(ListingView::Failed(message)) => {
                let message = message.clone();
                self.render_error(ui, &message, actions);
                return;
            }
            View::Listing(ListingView::Ready(feed)) => feed,
            _ => return,
        };

        if feed.stories().is_empty() {
            let text = match &feed.query().domain {
                Some(domain) => format!("No posts found matching \"{domain}\"."),
                None => "No results found.".to_string(),
            };
            ui.label(RichText::new(text).color(self.theme.secondary_text).size(16.0));
            return;
        }

        let stories = feed.stories().to_vec();
        let has_more = feed.has_more();
        let state = feed.state();
        let loading = state == FeedState::Loading;
        let partial = feed.partial_first_page();
        let loaded_through = feed.next_page().saturating_sub(1);
        let total_pages = feed.total_pages();
        let now = now();
        let mut sentinel_visible = false;

        ui.label(
            RichText::new(format!(
                "{} stories, through page {} of {}",
                stories.len(),
                loaded_through,
                total_pages
            ))
            .color(self.theme.secondary_text)
            .size(13.0),
        );

        let scroll_response = ScrollArea::vertical()
            .id_salt("stories_scroll_area")
            .auto_shrink([false, false])
            .vertical_scroll_offset(self.stories_scroll_offset)
            .show(ui, |ui| {
                if partial {
                    ui.label(
                        RichText::new(format!(
                            "Partial page: fewer than {HITS_PER_PAGE} stories matched."
                        ))
                        .color(self.theme.secondary_text)
                        .italics(),
                    );
                }

                for story in &stories {
                    self.render_story_card(ui, story, now, actions);
                }

                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if has_more {
                        let sentinel = if loading {
                            ui.spinner()
                        } else {
                            ui.label(RichText::new(state.sentinel_label()).color(self.theme.secondary_text))
                        };
                        sentinel_visible = ui.is_rect_visible(sentinel.rect);
                    } else {
                        ui.label(
                            RichText::new(FeedState::Exhausted.sentinel_label())
                                .color(self.theme.secondary_text)
                                .size(14.0),
                        );
                    }
                });
                ui.add_space(20.0);
            });
        self.stories_scroll_offset = scroll_response.state.offset.y;

        let request = match &mut self.view {
            View::Listing(ListingView::Ready(feed)) => feed.on_sentinel_visibility(sentinel_visible, now),
            _ => None,
        };
        if let Some(request) = request {
            self.spawn_next_page(request);
        }
    }

    fn render_story_card(&self, ui: &mut Ui, story: &Story, now: i64, actions: &mut Vec<UiAction>) {
        egui::Frame::new()
            .fill(self.theme.card_background(story.score))
            .corner_radius(CornerRadius::same(8))
            .stroke(self.theme.card_stroke(story.score, story.saved))
            .inner_margin(12.0)
            .outer_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let title = ui.add(
                        egui::Label::new(
                            RichText::new(&story.title)
                                .color(self.theme.link_color)
                                .size(17.0)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if title.clicked() {
                        actions.push(UiAction::Navigate(Route::Item { id: story.id.clone() }));
                    }
                    if title.hovered() {
                        ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                    }
                });

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        let meta = |text: String| RichText::new(text).color(self.theme.secondary_text).size(14.0);
                        ui.label(meta(format!("by {}", story.author)));
                        ui.label(meta(format!(
                            "{} points | {} comments",
                            story.points, story.comments_count
                        )));
                        ui.label(meta(time_ago(story.created_at, now)));
                        if let Some(url) = &story.url {
                            let domain = domain_of(url);
                            if !domain.is_empty() {
                                ui.label(meta(domain).italics());
                            }
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let save_label = if story.saved { "Unsave" } else { "Save" };
                        let save_btn = ui.add(
                            egui::Button::new(RichText::new(save_label).color(Color32::WHITE))
                                .corner_radius(CornerRadius::same(6))
                                .fill(self.theme.saved),
                        );
                        if save_btn.clicked() {
                            actions.push(UiAction::ToggleSaved(story.id.clone()));
                        }

                        if let Some(url) = &story.url {
                            ui.add_space(6.0);
                            if ui.button("↗").on_hover_text("Open Link").clicked() {
                                actions.push(UiAction::OpenLink(url.clone()));
                            }
                        }

                        ui.add_space(12.0);
                        self.score_gauge(ui, story.score);
                    });
                });
            });
    }

    fn score_gauge(&self, ui: &mut Ui, score: f64) {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(48.0, 48.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = 19.0;

        painter.circle_stroke(center, radius, Stroke::new(4.0, self.theme.separator));
        let fraction = gauge_fraction(score);
        if fraction > 0.0 {
            let steps = 48;
            let start = -std::f32::consts::FRAC_PI_2;
            let sweep = fraction * std::f32::consts::TAU;
            let points: Vec<egui::Pos2> = (0..=steps)
                .map(|i| {
                    let angle = start + sweep * i as f32 / steps as f32;
                    center + radius * egui::vec2(angle.cos(), angle.sin())
                })
                .collect();
            painter.add(egui::Shape::line(
                points,
                Stroke::new(4.0, self.theme.score_color(score)),
            ));
        }
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            format!("{score:.2}"),
            egui::FontId::proportional(12.0),
            self.theme.text,
        );
        response.on_hover_text("Rank score: engagement decayed by age");
    }

    fn render_error(&self, ui: &mut Ui, message: &str, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Error: {message}")).color(self.theme.error).size(16.0));
            if ui.link("Retry").clicked() {
                actions.push(UiAction::Reload);
            }
        });
    }

    fn render_item(&self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        if ui.link("< Back to listing").clicked() {
            actions.push(UiAction::Navigate(self.last_listing.clone()));
        }
        ui.add_space(8.0);

        let item = match &self.view {
            View::Item(ItemPage::Loading) => {
                ui.spinner();
                return;
            }
            View::Item(ItemPage::Failed(message)) => {
                ui.label(RichText::new(format!("Error: {message}")).color(self.theme.error).size(16.0));
                return;
            }
            View::Item(ItemPage::Ready(item)) => item,
            _ => return,
        };

        ui.heading(RichText::new(&item.title).color(self.theme.highlight).size(26.0).strong());
        ui.add_space(4.0);

        let mut meta = format!("by {} | {} points", item.author, item.points);
        if let Some(created) = item.created_at {
            meta.push_str(&format!(" | {}", time_ago(created.timestamp(), now())));
        }
        if let Some(url) = &item.url {
            let domain = domain_of(url);
            if !domain.is_empty() {
                meta.push_str(&format!(" | {domain}"));
            }
        }
        ui.label(RichText::new(meta).color(self.theme.secondary_text));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if let Some(url) = &item.url {
                if ui.link("Original link").clicked() {
                    actions.push(UiAction::OpenLink(url.clone()));
                }
                ui.add_space(12.0);
            }
            if ui.link("Full HN discussion").clicked() {
                actions.push(UiAction::OpenLink(item.discussion_url()));
            }
            ui.add_space(12.0);
            if ui.button("Copy link").clicked() {
                actions.push(UiAction::CopyLink(item.discussion_url()));
            }
            ui.add_space(12.0);
            let saved = self.is_saved(&item.id);
            let save_btn = ui.add(
                egui::Button::new(
                    RichText::new(if saved { "Unsave" } else { "Save" }).color(Color32::WHITE),
                )
                .corner_radius(CornerRadius::same(6))
                .fill(self.theme.saved),
            );
            if save_btn.clicked() {
                actions.push(UiAction::ToggleSaved(item.id.clone()));
            }
        });

        ui.add_space(16.0);
        ui.heading(
            RichText::new(format!("Latest {} Comments", crate::item::LATEST_COMMENTS))
                .color(self.theme.highlight)
                .size(20.0),
        );
        ui.add_space(8.0);

        if item.latest_comments.is_empty() {
            ui.label(RichText::new("No comments yet.").color(self.theme.secondary_text));
            return;
        }

        ScrollArea::vertical()
            .id_salt("comments_scroll_area")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for comment in &item.latest_comments {
                    egui::Frame::new()
                        .fill(self.theme.card_background)
                        .corner_radius(CornerRadius::same(8))
                        .stroke(Stroke::new(1.0, self.theme.separator))
                        .inner_margin(12.0)
                        .outer_margin(egui::vec2(0.0, 4.0))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            let age = comment
                                .created_at
                                .map(|c| time_ago(c.timestamp(), now()))
                                .unwrap_or_default();
                            ui.label(
                                RichText::new(format!("{} ({age})", comment.author))
                                    .color(self.theme.text)
                                    .strong(),
                            );
                            ui.add_space(4.0);
                            ui.label(RichText::new(comment_html::to_plain_text(&comment.text)).color(self.theme.text));
                            for link in comment_html::links(&comment.text) {
                                if ui.link(link.as_str()).clicked() {
                                    actions.push(UiAction::OpenLink(link.clone()));
                                }
                            }
                        });
                }
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{} comments in the thread", item.total_comments))
                        .color(self.theme.secondary_text)
                        .italics(),
                );
            });
    }

    fn render_not_found(&self, ui: &mut Ui, path: &str, actions: &mut Vec<UiAction>) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(RichText::new("404").color(self.theme.error).size(32.0));
            ui.label(RichText::new(format!("Nothing lives at {path}")).color(self.theme.secondary_text));
            if ui.link("Back to listing").clicked() {
                actions.push(UiAction::Navigate(Route::first_page(ListingQuery::default())));
            }
        });
    }
}

fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

impl eframe::App for ScoutApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string("is_dark_mode", self.is_dark_mode.to_string());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply_to_ctx(ctx);
        self.check_loading_threads();

        let mut actions = Vec::new();

        let typing = ctx.memory(|m| m.focused().is_some());
        if !typing && matches!(self.view, View::Item(_)) && ctx.input(|i| i.key_pressed(egui::Key::Backspace)) {
            actions.push(UiAction::Navigate(self.last_listing.clone()));
        }

        self.render_saved_panel(ctx, &mut actions);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui, &mut actions);
            ui.add(egui::Separator::default().spacing(12.0));

            if let View::NotFound(path) = &self.view {
                let path = path.clone();
                self.render_not_found(ui, &path, &mut actions);
            } else if matches!(self.view, View::Item(_)) {
                self.render_item(ui, &mut actions);
            } else {
                self.render_listing(ui, &mut actions);
            }
        });

        for action in actions {
            self.apply(action);
        }
    }
}
