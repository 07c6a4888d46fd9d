//! Chart registry: exactly one live chart per slot.

use std::collections::BTreeMap;

use casestats_domain::dashboard::DashboardData;

use crate::chart::{ChartSlot, ChartSpec};
use crate::theme::Palette;

/// A drawing target bound to one slot.
pub trait ChartCanvas {
    type Error;

    /// Wipe everything previously drawn.
    fn clear(&self);

    /// Draw `spec` from scratch using `palette` for ticks, grid and legend.
    ///
    /// # Errors
    ///
    /// Returns the backend error when drawing fails.
    fn draw(&self, spec: &ChartSpec, palette: &Palette) -> Result<(), Self::Error>;
}

/// Resolves the canvas bound to a slot, if it exists on the page.
pub trait CanvasLookup {
    type Canvas: ChartCanvas;

    fn canvas(&self, slot: ChartSlot) -> Option<Self::Canvas>;
}

/// A chart currently drawn on its canvas.
pub struct ChartInstance<C> {
    spec: ChartSpec,
    canvas: C,
}

impl<C: ChartCanvas> ChartInstance<C> {
    /// The spec this chart was built from.
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    fn destroy(self) {
        self.canvas.clear();
    }
}

/// A slot that failed to draw.
#[derive(Debug)]
pub struct RenderFailure<E> {
    pub slot: ChartSlot,
    pub error: E,
}

/// Owner of every live chart instance, keyed by slot.
pub struct ChartRegistry<C> {
    charts: BTreeMap<ChartSlot, ChartInstance<C>>,
}

impl<C> Default for ChartRegistry<C> {
    fn default() -> Self {
        Self {
            charts: BTreeMap::new(),
        }
    }
}

impl<C: ChartCanvas> ChartRegistry<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every chart with one built from `data`.
    ///
    /// For each slot the previous instance is destroyed first; a slot whose
    /// canvas is missing is skipped and stays empty. Slots that fail to draw
    /// also stay empty and are reported back.
    pub fn render<L>(
        &mut self,
        data: &DashboardData,
        palette: &Palette,
        lookup: &L,
    ) -> Vec<RenderFailure<C::Error>>
    where
        L: CanvasLookup<Canvas = C>,
    {
        let mut failures = Vec::new();
        for slot in ChartSlot::ALL {
            if let Some(previous) = self.charts.remove(&slot) {
                previous.destroy();
            }
            let Some(canvas) = lookup.canvas(slot) else {
                continue;
            };
            let spec = ChartSpec::for_slot(slot, data);
            match canvas.draw(&spec, palette) {
                Ok(()) => {
                    self.charts.insert(slot, ChartInstance { spec, canvas });
                }
                Err(error) => {
                    canvas.clear();
                    failures.push(RenderFailure { slot, error });
                }
            }
        }
        failures
    }

    /// Redraw every live chart with a new palette.
    ///
    /// Charts that fail to redraw are destroyed and reported.
    pub fn apply_palette(&mut self, palette: &Palette) -> Vec<RenderFailure<C::Error>> {
        let mut failures = Vec::new();
        let slots: Vec<ChartSlot> = self.charts.keys().copied().collect();
        for slot in slots {
            let Some(instance) = self.charts.get(&slot) else {
                continue;
            };
            instance.canvas.clear();
            if let Err(error) = instance.canvas.draw(&instance.spec, palette) {
                if let Some(broken) = self.charts.remove(&slot) {
                    broken.destroy();
                }
                failures.push(RenderFailure { slot, error });
            }
        }
        failures
    }

    #[must_use]
    pub fn get(&self, slot: ChartSlot) -> Option<&ChartInstance<C>> {
        self.charts.get(&slot)
    }

    /// Slots that currently hold a chart.
    pub fn slots(&self) -> impl Iterator<Item = ChartSlot> + '_ {
        self.charts.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Surface {
        /// Charts currently visible on the canvas (a leak shows up as > 1).
        visible: usize,
        draws: usize,
        last_palette: Option<Palette>,
    }

    #[derive(Clone)]
    struct FakeCanvas {
        surface: Rc<RefCell<Surface>>,
        fail: bool,
    }

    impl ChartCanvas for FakeCanvas {
        type Error = String;

        fn clear(&self) {
            self.surface.borrow_mut().visible = 0;
        }

        fn draw(&self, _spec: &ChartSpec, palette: &Palette) -> Result<(), String> {
            if self.fail {
                return Err("context lost".to_string());
            }
            let mut surface = self.surface.borrow_mut();
            surface.visible += 1;
            surface.draws += 1;
            surface.last_palette = Some(*palette);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePage {
        surfaces: HashMap<ChartSlot, Rc<RefCell<Surface>>>,
        missing: HashSet<ChartSlot>,
        failing: HashSet<ChartSlot>,
    }

    impl FakePage {
        fn surface(&self, slot: ChartSlot) -> std::cell::Ref<'_, Surface> {
            self.surfaces[&slot].borrow()
        }
    }

    impl CanvasLookup for FakePage {
        type Canvas = FakeCanvas;

        fn canvas(&self, slot: ChartSlot) -> Option<FakeCanvas> {
            if self.missing.contains(&slot) {
                return None;
            }
            Some(FakeCanvas {
                surface: Rc::clone(&self.surfaces[&slot]),
                fail: self.failing.contains(&slot),
            })
        }
    }

    fn page() -> FakePage {
        FakePage {
            surfaces: ChartSlot::ALL
                .iter()
                .map(|slot| (*slot, Rc::default()))
                .collect(),
            ..FakePage::default()
        }
    }

    fn data() -> DashboardData {
        DashboardData {
            cases_by_status: [("leve", 3)].into_iter().collect(),
            top_cities: [("CALI", 3)].into_iter().collect(),
            ..DashboardData::default()
        }
    }

    #[test]
    fn should_create_one_chart_per_slot() {
        let page = page();
        let mut registry = ChartRegistry::new();

        let failures = registry.render(&data(), &Palette::default(), &page);

        assert!(failures.is_empty());
        assert_eq!(registry.len(), 5);
        for slot in ChartSlot::ALL {
            assert_eq!(page.surface(slot).visible, 1);
        }
    }

    #[test]
    fn should_not_accumulate_charts_on_repeated_render() {
        let page = page();
        let mut registry = ChartRegistry::new();

        registry.render(&data(), &Palette::default(), &page);
        registry.render(&data(), &Palette::default(), &page);

        assert_eq!(registry.len(), 5);
        for slot in ChartSlot::ALL {
            let surface = page.surface(slot);
            assert_eq!(surface.visible, 1, "slot {}", slot.name());
            assert_eq!(surface.draws, 2);
        }
    }

    #[test]
    fn should_skip_missing_canvas_silently() {
        let mut page = page();
        page.missing.insert(ChartSlot::Gender);
        let mut registry = ChartRegistry::new();

        let failures = registry.render(&data(), &Palette::default(), &page);

        assert!(failures.is_empty());
        assert_eq!(registry.len(), 4);
        assert!(registry.get(ChartSlot::Gender).is_none());
        assert_eq!(page.surface(ChartSlot::Gender).draws, 0);
    }

    #[test]
    fn should_report_draw_failure_and_leave_slot_empty() {
        let mut page = page();
        page.failing.insert(ChartSlot::Deaths);
        let mut registry = ChartRegistry::new();

        let failures = registry.render(&data(), &Palette::default(), &page);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].slot, ChartSlot::Deaths);
        assert_eq!(failures[0].error, "context lost");
        assert!(registry.get(ChartSlot::Deaths).is_none());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn should_keep_spec_of_live_chart() {
        let page = page();
        let mut registry = ChartRegistry::new();
        registry.render(&data(), &Palette::default(), &page);

        let spec = registry.get(ChartSlot::Cities).unwrap().spec();
        assert_eq!(spec.labels, vec!["CALI"]);
    }

    #[test]
    fn should_redraw_live_charts_with_new_palette() {
        let mut page = page();
        page.missing.insert(ChartSlot::Age);
        let mut registry = ChartRegistry::new();
        registry.render(&data(), &Theme::Light.palette(), &page);

        let failures = registry.apply_palette(&Theme::Dark.palette());

        assert!(failures.is_empty());
        for slot in registry.slots() {
            let surface = page.surface(slot);
            assert_eq!(surface.visible, 1);
            assert_eq!(surface.last_palette, Some(Theme::Dark.palette()));
        }
        assert_eq!(page.surface(ChartSlot::Age).draws, 0);
    }
}
