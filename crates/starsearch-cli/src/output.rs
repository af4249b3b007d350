//! Output formatting for search results and the city index.

use clap::ValueEnum;
use serde::Serialize;

use starsearch_lib::{render_city_index, Error as LibError, Graph, SearchSummary};

/// Supported output formats for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Debug, Serialize)]
struct CityListing<'a> {
    index: usize,
    name: &'a str,
    code: &'a str,
}

impl OutputFormat {
    /// Render a finished search.
    ///
    /// Fails with a route-not-found error when the goal was never reached, in
    /// either format.
    pub fn render_search(
        self,
        summary: &SearchSummary,
        include_tracker: bool,
    ) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render_plain(include_tracker)?),
            OutputFormat::Json => {
                if !summary.goal_reached() {
                    return Err(LibError::RouteNotFound {
                        start: summary.source.name.clone(),
                        goal: summary.goal.name.clone(),
                    }
                    .into());
                }
                let mut rendered = serde_json::to_string_pretty(summary)?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }

    /// Render the index of every city in `graph`.
    pub fn render_cities(self, graph: &Graph) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(render_city_index(graph)),
            OutputFormat::Json => {
                let listing: Vec<_> = graph
                    .cities()
                    .map(|(index, title)| CityListing {
                        index,
                        name: &title.name,
                        code: &title.code,
                    })
                    .collect();
                let mut rendered = serde_json::to_string_pretty(&listing)?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }
}
