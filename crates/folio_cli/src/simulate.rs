//! Headless page runs for `folio resolve` and `folio simulate`

use anyhow::Result;
use folio_app::{AppConfig, Page};
use folio_content::Catalog;
use folio_core::Viewport;
use folio_layout::AboutTab;
use tracing::info;

pub struct Options {
    pub step: f32,
    pub to: Option<f32>,
    pub tab: Option<String>,
}

pub fn resolve(config: AppConfig, catalog: Catalog, viewport: Viewport, offsets: &[f32]) -> Result<()> {
    let page = Page::new(config, catalog, viewport);
    for section in &page.layout().sections {
        info!("{:<10} {:>7.0} .. {:>7.0}", section.id, section.top_offset, section.bottom());
    }

    for &offset in offsets {
        let scroll_y = page.scroll_to(offset);
        let state = page.state();
        println!(
            "{:>8.0}  {}",
            scroll_y,
            state.active_section.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub fn run(config: AppConfig, catalog: Catalog, viewport: Viewport, options: &Options) -> Result<()> {
    if !options.step.is_finite() || options.step <= 0.0 {
        anyhow::bail!("--step must be a positive number, got {}", options.step);
    }
    let tab = match options.tab.as_deref() {
        Some(name) => Some(
            AboutTab::ALL
                .into_iter()
                .find(|tab| tab.as_str() == name)
                .ok_or_else(|| anyhow::anyhow!("Unknown tab '{}', expected journey, courses or achievements", name))?,
        ),
        None => None,
    };

    let mut page = Page::new(config, catalog, viewport);
    page.mount();
    if let Some(tab) = tab {
        page.select_about_tab(tab);
    }

    let end = options.to.unwrap_or(page.layout().height).max(0.0);
    let mut scroll_y = 0.0;
    let mut frame = 0u32;
    loop {
        let report = page.run_frame();
        let state = page.state();
        if !report.revealed.is_empty() || !report.concealed.is_empty() {
            let revealed: Vec<_> = report
                .revealed
                .iter()
                .map(|r| format!("{}+{}ms", r.key, r.delay.as_millis()))
                .collect();
            println!(
                "frame {:>3}  y={:>6.0}  [{}]  revealed: {}",
                frame,
                state.scroll_y,
                state.active_section.as_deref().unwrap_or("-"),
                revealed.join(" ")
            );
            if !report.concealed.is_empty() {
                println!("{:>28}concealed: {}", "", report.concealed.join(" "));
            }
        }

        if scroll_y >= end || state.scroll_progress >= 1.0 {
            info!(
                "{} frame(s), {}/{} element(s) revealed",
                frame + 1,
                state.revealed,
                state.tracked
            );
            break;
        }
        scroll_y = (scroll_y + options.step).min(end);
        page.scroll_to(scroll_y);
        frame += 1;
    }
    page.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_step(step: f32) -> Result<()> {
        let options = Options {
            step,
            to: Some(800.0),
            tab: None,
        };
        run(AppConfig::default(), Catalog::builtin()?, Viewport::new(1280.0, 800.0), &options)
    }

    #[test]
    fn test_step_must_be_positive_and_finite() {
        for step in [0.0, -50.0, f32::NAN, f32::INFINITY] {
            let err = run_with_step(step).unwrap_err();
            assert!(err.to_string().starts_with("--step must be a positive number"), "{err}");
        }
    }

    #[test]
    fn test_simulation_stops_at_target() {
        assert!(run_with_step(400.0).is_ok());
    }

    #[test]
    fn test_unknown_tab_is_rejected() {
        let options = Options {
            step: 100.0,
            to: None,
            tab: Some("hobbies".to_string()),
        };
        let err = run(AppConfig::default(), Catalog::builtin().unwrap(), Viewport::default(), &options).unwrap_err();
        assert!(err.to_string().contains("Unknown tab 'hobbies'"));
    }
}
