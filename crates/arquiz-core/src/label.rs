//! Name label bound to a single entity.

use arquiz_oui::widget::WorldLabel;
use arquiz_oui::Vec3;
use tracing::info;

/// Text shown while no entity is presented
pub const LABEL_PLACEHOLDER: &str = "...";

/// Anything with a human-readable name
pub trait Named {
    fn display_name(&self) -> &str;
}

impl Named for String {
    fn display_name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn display_name(&self) -> &str {
        self
    }
}

/// Copies an entity's name into a world label on demand.
pub struct LabelPresenter<E> {
    entity: E,
    label: WorldLabel,
}

impl<E: Named> LabelPresenter<E> {
    pub fn new(entity: E, label: WorldLabel) -> Self {
        Self { entity, label }
    }

    /// Label anchored at `position`, starting with the placeholder
    pub fn anchored(entity: E, id: impl Into<String>, position: Vec3) -> Self {
        Self::new(entity, WorldLabel::new(id, position, LABEL_PLACEHOLDER))
    }

    pub fn present(&mut self) {
        let name = self.entity.display_name();
        info!("Hello, I am {name}");
        self.label.set_text(name);
    }

    pub fn clear(&mut self) {
        self.label.set_text(LABEL_PLACEHOLDER);
    }

    /// Swap the bound entity. The label text is left as is.
    pub fn rebind(&mut self, entity: E) {
        self.entity = entity;
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn text(&self) -> &str {
        self.label.text()
    }

    pub fn label(&self) -> &WorldLabel {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut WorldLabel {
        &mut self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card {
        title: String,
    }

    impl Named for Card {
        fn display_name(&self) -> &str {
            &self.title
        }
    }

    #[test]
    fn test_present_then_clear() {
        let card = Card {
            title: "Ball".into(),
        };
        let mut presenter = LabelPresenter::anchored(card, "name", Vec3::ZERO);
        assert_eq!(presenter.text(), LABEL_PLACEHOLDER);

        presenter.present();
        assert_eq!(presenter.text(), "Ball");

        presenter.clear();
        assert_eq!(presenter.text(), "...");
    }

    #[test]
    fn test_rebind_presents_new_name() {
        let mut presenter = LabelPresenter::anchored("Ball".to_string(), "name", Vec3::ZERO);
        presenter.present();
        presenter.rebind("Box".to_string());
        assert_eq!(presenter.text(), "Ball");
        presenter.present();
        assert_eq!(presenter.text(), "Box");
    }
}
