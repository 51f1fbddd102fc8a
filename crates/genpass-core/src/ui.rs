//! Interface to the rendering / widget binding layer.
//!
//! The core never touches widgets. It issues [`UiCommand`]s and asks for the
//! document height when the embedding page needs to resize its container.

use serde::Deserialize;

use crate::config::ConfigRecord;
use crate::locale::Localization;

/// Tracked form inputs. Editing any of them invalidates a shown result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Password,
    Secret,
    Domain,
    Length,
    Method,
    Cost,
    Counter,
    DisableTld,
}

/// Commands from the core to the UI collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Replace the domain field value.
    SetDomain(String),
    /// Replace the length field with a validated value.
    SetLength(u32),
    /// Load a configuration record into the form.
    ApplyConfig(ConfigRecord),
    /// Mark a required field as missing.
    FlagMissing(Field),
    /// Clear all missing markers.
    ClearMissing,
    /// Hide the generate control and show the progress mask.
    ShowProgress(String),
    /// Put the derived password behind the mask and arm the reveal toggle.
    Reveal { password: String },
    /// Show (`false`) or hide (`true`) the derived password.
    SetMasked(bool),
    /// Remove any derived password or progress and show the generate control again.
    ClearResult,
    ShowCostField(bool),
    ToggleAdvanced,
    /// A newer bookmarklet is available.
    ShowUpdate { bookmarklet: String },
    ShowIdenticon(String),
    HideIdenticon,
    Localize(&'static Localization),
}

/// The UI binding layer.
pub trait Ui {
    fn apply(&mut self, command: UiCommand);

    /// Current height of the rendered document in pixels.
    fn document_height(&self) -> u32;
}
