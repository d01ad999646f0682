use crate::utils::*;
use serde::{Deserialize, Serialize};

/// Color scheme applied through the `data-theme` attribute on `<html>`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn update_html(self) {
        let html = gloo::utils::document_element();
        let scheme = self.scheme();
        log::debug!("theme-scheme: {}", scheme);
        if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    /// Reapply the stored preference at boot.
    pub(crate) fn init() {
        Self::local_or_default().update_html();
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "parejas:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_the_scheme() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().scheme(), "light");
        assert_eq!(<Theme as StorageKey>::KEY, "parejas:theme");
    }
}
