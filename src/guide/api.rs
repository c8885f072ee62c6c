//! Guide API - render the travel guide as result items

use anyhow::Result;

use crate::core::loader::load_guide;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::DataPaths;
use crate::core::render::{RenderConfig, Renderer};
use crate::guide::model::{Guide, Section, SectionKey};
use crate::guide::render::render_section;

/// Render guide sections as result items.
///
/// With no filter every section is rendered, unknown keys included. With a
/// filter only sections whose key matches are kept, in document order.
pub fn guide_results(guide: &Guide, filter: &[SectionKey]) -> ResultSet {
    let render = |section: &Section| ResultItem::section(section.key(), render_section(section));

    if filter.is_empty() {
        guide.sections.iter().map(render).collect()
    } else {
        guide.sections_for(filter).map(render).collect()
    }
}

/// Run the guide command
pub fn run_guide(paths: &DataPaths, filter: &[SectionKey], config: RenderConfig) -> Result<()> {
    let result_set = match load_guide(&paths.guide) {
        Ok(guide) => guide_results(&guide, filter),
        Err(err) => std::iter::once(err.to_result_item()).collect(),
    };

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    Ok(())
}
