//! `rbxdl categories` – list asset types.

use rbxdl_core::category::{AssetCategory, FetchRoute};

pub fn run_categories() {
    println!("{:<10} {:<7} {}", "TYPE", "SUFFIX", "SOURCE");
    for category in AssetCategory::ALL {
        let source = match category.route() {
            FetchRoute::ContentXml => "asset XML <Content> url",
            FetchRoute::ById => "asset delivery by id",
        };
        println!("{:<10} {:<7} {}", category.as_str(), category.suffix(), source);
    }
}
