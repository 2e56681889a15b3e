use lesson_core::model::PageView;

/// Flips an accordion's open state.
///
/// Purely visual: never persisted, never counted toward progress.
pub fn toggle(page: &mut PageView, index: usize) {
    if let Some(accordion) = page.accordions.get_mut(index) {
        accordion.open = !accordion.open;
    }
}
