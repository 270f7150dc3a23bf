//! Hero image carousel.
//!
//! [`Carousel`] is the timing-free state machine; [`HeroSlider`] binds it to
//! the `heroSlides`/`heroDots` containers.

use crate::{Document, Fragment, HeroConfig, NodeId, Result, TemplateEngine};
use beehive_log::debug;
use serde_json::json;
use std::time::Duration;

/// A started slide change, committed by [`Carousel::finish_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Slide index, one transition at a time, and autoplay bookkeeping.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    pending: Option<usize>,
    interval: Duration,
    running: bool,
    elapsed: Duration,
}

impl Carousel {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            index: 0,
            pending: None,
            interval,
            running: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the slide currently shown.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin moving to `target`, wrapping past either end.
    ///
    /// Ignored while another transition is in flight or when `target` is the
    /// current slide.
    pub fn go_to(&mut self, target: isize) -> Option<Transition> {
        if self.is_animating() || self.len == 0 {
            return None;
        }
        let len = self.len as isize;
        let to = if target < 0 {
            self.len - 1
        } else if target >= len {
            0
        } else {
            target as usize
        };
        if to == self.index {
            return None;
        }
        self.pending = Some(to);
        Some(Transition {
            from: self.index,
            to,
        })
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.go_to(self.index as isize + 1)
    }

    pub fn prev(&mut self) -> Option<Transition> {
        self.go_to(self.index as isize - 1)
    }

    /// Commit the in-flight transition; returns the new index.
    pub fn finish_transition(&mut self) -> Option<usize> {
        let to = self.pending.take()?;
        self.index = to;
        Some(to)
    }

    /// (Re)start autoplay from a full interval.
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Let `delta` pass; fires `next` once per elapsed interval while running.
    pub fn advance(&mut self, delta: Duration) -> Option<Transition> {
        if !self.running || self.interval.is_zero() {
            return None;
        }
        self.elapsed += delta;
        let mut fired = None;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired = self.next().or(fired);
        }
        fired
    }

    /// Manual navigation: stop, move, restart the autoplay interval.
    pub fn navigate(&mut self, target: isize) -> Option<Transition> {
        self.stop();
        let transition = self.go_to(target);
        self.start();
        transition
    }
}

/// Carousel mounted in the hero section.
#[derive(Debug)]
pub struct HeroSlider {
    carousel: Carousel,
    images: Vec<String>,
    slides: NodeId,
    dots: NodeId,
}

/// Element ids the slider needs, all of them.
pub const HERO_ELEMENT_IDS: [&str; 5] =
    ["heroSlider", "heroSlides", "heroDots", "heroPrev", "heroNext"];

impl HeroSlider {
    /// Render slides and dots and start autoplay.
    ///
    /// `None` when any hero element is missing or there are no images.
    pub fn mount(
        doc: &dyn Document,
        engine: &TemplateEngine,
        config: &HeroConfig,
    ) -> Result<Option<Self>> {
        let nodes = HERO_ELEMENT_IDS.map(|id| doc.element_by_id(id));
        let [Some(_), Some(slides), Some(dots), Some(_), Some(_)] = nodes else {
            debug!(target: "beehive::page", "hero slider elements missing");
            return Ok(None);
        };
        if config.images.is_empty() {
            return Ok(None);
        }

        let mut slider = Self {
            carousel: Carousel::new(config.images.len(), Duration::from_millis(config.interval_ms)),
            images: config.images.clone(),
            slides,
            dots,
        };
        slider.render(doc, engine)?;
        slider.carousel.start();
        Ok(Some(slider))
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.carousel.navigate(self.carousel.index() as isize + 1)
    }

    pub fn prev(&mut self) -> Option<Transition> {
        self.carousel.navigate(self.carousel.index() as isize - 1)
    }

    /// Dot click.
    pub fn go_to(&mut self, index: usize) -> Option<Transition> {
        self.carousel.navigate(index as isize)
    }

    pub fn mouse_enter(&mut self) {
        self.carousel.stop();
    }

    pub fn mouse_leave(&mut self) {
        self.carousel.start();
    }

    pub fn tick(&mut self, delta: Duration) -> Option<Transition> {
        self.carousel.advance(delta)
    }

    /// Commit the running transition and redraw the active slide and dot.
    pub fn finish_transition(
        &mut self,
        doc: &dyn Document,
        engine: &TemplateEngine,
    ) -> Result<Option<usize>> {
        let Some(index) = self.carousel.finish_transition() else {
            return Ok(None);
        };
        self.render(doc, engine)?;
        Ok(Some(index))
    }

    fn render(&self, doc: &dyn Document, engine: &TemplateEngine) -> Result<()> {
        let active = self.carousel.index();

        let slides = self
            .images
            .iter()
            .enumerate()
            .map(|(index, src)| {
                engine.render(
                    "hero_slide",
                    &json!({"src": src, "index": index, "active": index == active}),
                )
            })
            .collect::<Result<Fragment>>()?;

        let dots = (0..self.images.len())
            .map(|index| {
                engine.render(
                    "hero_dot",
                    &json!({"index": index, "number": index + 1, "active": index == active}),
                )
            })
            .collect::<Result<Fragment>>()?;

        slides.mount(doc, self.slides);
        dots.mount(doc, self.dots);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryDocument, TemplateConfig};

    const INTERVAL: Duration = Duration::from_millis(5500);

    #[test]
    fn test_wrapping() {
        let mut carousel = Carousel::new(3, INTERVAL);

        assert_eq!(carousel.prev(), Some(Transition { from: 0, to: 2 }));
        assert_eq!(carousel.finish_transition(), Some(2));
        assert_eq!(carousel.next(), Some(Transition { from: 2, to: 0 }));
        carousel.finish_transition();
        assert_eq!(carousel.go_to(7), None);
        assert_eq!(carousel.go_to(-4), Some(Transition { from: 0, to: 2 }));
    }

    #[test]
    fn test_one_transition_at_a_time() {
        let mut carousel = Carousel::new(3, INTERVAL);

        assert!(carousel.next().is_some());
        assert!(carousel.is_animating());
        assert_eq!(carousel.next(), None);
        assert_eq!(carousel.go_to(2), None);

        assert_eq!(carousel.finish_transition(), Some(1));
        assert_eq!(carousel.finish_transition(), None);
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn test_same_index_is_ignored() {
        let mut carousel = Carousel::new(3, INTERVAL);
        assert_eq!(carousel.go_to(0), None);
        assert!(!carousel.is_animating());
    }

    #[test]
    fn test_autoplay() {
        let mut carousel = Carousel::new(3, INTERVAL);
        assert_eq!(carousel.advance(INTERVAL), None);

        carousel.start();
        assert_eq!(carousel.advance(Duration::from_millis(5000)), None);
        assert_eq!(
            carousel.advance(Duration::from_millis(500)),
            Some(Transition { from: 0, to: 1 })
        );
        carousel.finish_transition();

        carousel.stop();
        assert_eq!(carousel.advance(INTERVAL * 3), None);
    }

    #[test]
    fn test_manual_navigation_restarts_interval() {
        let mut carousel = Carousel::new(3, INTERVAL);
        carousel.start();
        carousel.advance(Duration::from_millis(5000));

        assert!(carousel.navigate(2).is_some());
        carousel.finish_transition();
        assert!(carousel.is_running());
        assert_eq!(carousel.advance(Duration::from_millis(1000)), None);
    }

    fn hero_doc() -> MemoryDocument {
        let doc = MemoryDocument::default();
        for id in HERO_ELEMENT_IDS {
            doc.insert_with_id("div", id);
        }
        doc
    }

    #[test]
    fn test_slider_mount_and_dots() {
        let doc = hero_doc();
        let engine = TemplateEngine::new(TemplateConfig::default()).unwrap();
        let mut slider = HeroSlider::mount(&doc, &engine, &HeroConfig::default())
            .unwrap()
            .unwrap();

        let dots = doc.element_by_id("heroDots").unwrap();
        let slides = doc.element_by_id("heroSlides").unwrap();
        assert_eq!(doc.inner_html(slides).matches("hero-slide").count(), 3);
        assert_eq!(doc.inner_html(slides).matches("opacity-0").count(), 2);
        assert_eq!(doc.inner_html(dots).matches("bg-brand-500").count(), 1);
        assert!(slider.carousel().is_running());

        slider.mouse_enter();
        assert!(!slider.carousel().is_running());
        slider.mouse_leave();

        assert_eq!(slider.go_to(2), Some(Transition { from: 0, to: 2 }));
        assert_eq!(slider.finish_transition(&doc, &engine).unwrap(), Some(2));

        let html = doc.inner_html(dots);
        let active = html
            .split("<button")
            .find(|b| b.contains("bg-brand-500"))
            .unwrap();
        assert!(active.contains("data-index=\"2\""));
    }

    #[test]
    fn test_slider_needs_all_elements() {
        let doc = MemoryDocument::default();
        doc.insert_with_id("div", "heroSlides");
        let engine = TemplateEngine::new(TemplateConfig::default()).unwrap();
        assert!(HeroSlider::mount(&doc, &engine, &HeroConfig::default()).unwrap().is_none());
    }
}
