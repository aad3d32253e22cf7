//! Run-time configuration, assembled by the binary from its CLI flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_MAX_VISIBLE;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Large enough to pull the whole national dex in one request.
pub const DEFAULT_CATALOG_LIMIT: usize = 1200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_base: String,
    pub sprite_base: String,
    pub catalog_limit: usize,
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub initial_page: usize,
    pub initial_search: Option<String>,
    pub initial_pokemon: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            sprite_base: DEFAULT_SPRITE_BASE.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE,
            initial_page: 1,
            initial_search: None,
            initial_pokemon: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Trailing slashes are dropped so URL joins never produce `//`.
    pub fn normalized(mut self) -> Self {
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self.sprite_base = self.sprite_base.trim_end_matches('/').to_string();
        self.page_size = self.page_size.max(1);
        self.initial_page = self.initial_page.max(1);
        self.initial_search = self
            .initial_search
            .map(|query| query.trim().to_lowercase())
            .filter(|query| !query.is_empty());
        self.initial_pokemon = self
            .initial_pokemon
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty());
        self
    }

    pub fn sprite_url(&self, id: u32) -> String {
        format!("{}/{id}.png", self.sprite_base)
    }
}
