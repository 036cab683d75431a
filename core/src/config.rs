// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use crate::TipoAula;

/// The name of the application.
pub const APP_NAME: &str = "diario";

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size accepted by the backend.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Configuration of the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Items per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Kind given to sessions created by hand.
    #[serde(default)]
    pub default_tipo: TipoAula,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_tipo: TipoAula::default(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            tracing::warn!(
                page_size = self.page_size,
                "page size out of range, clamping to 1..={MAX_PAGE_SIZE}"
            );
            self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
