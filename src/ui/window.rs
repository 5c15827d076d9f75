//! Top-level window and its child layers

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use heapless::Vec;

/// Maximum number of children attached to the root layer
pub const MAX_CHILDREN: usize = 8;

/// Children of the root layer, in drawing order when attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerId {
    Background,
    Time,
    Day,
    Month,
    BatteryText,
    BatteryBar,
}

/// The single display surface of the face
pub struct Window {
    bounds: Rectangle,
    children: Vec<LayerId, MAX_CHILDREN>,
    background: Rgb565,
    fullscreen: bool,
}

impl Window {
    pub fn new(size: Size, background: Rgb565) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), size),
            children: Vec::new(),
            background,
            fullscreen: false,
        }
    }

    /// Bounds of the root layer
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Attach `id` on top of the existing children. A layer is attached at
    /// most once; returns `false` if it was already present or the list is full.
    pub fn add_child(&mut self, id: LayerId) -> bool {
        if self.children.contains(&id) {
            warn!("layer attached twice");
            return false;
        }
        self.children.push(id).is_ok()
    }

    pub fn remove_all_children(&mut self) {
        self.children.clear();
    }

    /// Children from bottom to top
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_keep_insertion_order() {
        let mut window = Window::new(Size::new(144, 168), Rgb565::BLACK);
        assert!(window.add_child(LayerId::Background));
        assert!(window.add_child(LayerId::Time));
        assert!(window.add_child(LayerId::BatteryBar));
        assert_eq!(window.children(), &[LayerId::Background, LayerId::Time, LayerId::BatteryBar]);
    }

    #[test]
    fn child_is_attached_once() {
        let mut window = Window::new(Size::new(144, 168), Rgb565::BLACK);
        assert!(window.add_child(LayerId::Day));
        assert!(!window.add_child(LayerId::Day));
        assert_eq!(window.children().len(), 1);
        window.remove_all_children();
        assert!(window.children().is_empty());
        assert!(window.add_child(LayerId::Day));
    }

    #[test]
    fn fullscreen_is_opt_in() {
        let mut window = Window::new(Size::new(144, 168), Rgb565::BLACK);
        assert!(!window.is_fullscreen());
        window.set_fullscreen(true);
        assert!(window.is_fullscreen());
    }
}
