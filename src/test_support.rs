use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, ScoutError};
use crate::hn_client::{HnApi, PageRequest};
use crate::models::{ItemNode, SearchPage};

/// Scripted [`HnApi`] that records every call.
#[derive(Default)]
pub struct FakeApi {
    search_results: Mutex<VecDeque<Result<SearchPage>>>,
    item_results: Mutex<VecDeque<Result<ItemNode>>>,
    search_calls: Mutex<Vec<PageRequest>>,
    item_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn push_search(&self, result: Result<SearchPage>) {
        self.search_results.lock().unwrap().push_back(result);
    }

    pub fn push_item(&self, result: Result<ItemNode>) {
        self.item_results.lock().unwrap().push_back(result);
    }

    pub fn search_calls(&self) -> Vec<PageRequest> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn item_calls(&self) -> Vec<String> {
        self.item_calls.lock().unwrap().clone()
    }
}

impl HnApi for FakeApi {
    fn search_page(&self, request: &PageRequest) -> Result<SearchPage> {
        self.search_calls.lock().unwrap().push(request.clone());
        self.search_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoutError::MalformedResponse("no scripted response".into())))
    }

    fn item(&self, id: &str) -> Result<ItemNode> {
        self.item_calls.lock().unwrap().push(id.to_string());
        self.item_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScoutError::Status(404)))
    }
}
