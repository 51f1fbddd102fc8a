//! Derivation orchestration state machine.
//!
//! `Idle -> Deriving -> Revealed`, with validation as the synchronous body of
//! [`Orchestrator::generate`] and a masked/shown toggle inside `Revealed`.
//!
//! The machine does no I/O. Every operation returns the [`Action`]s the
//! caller must carry out (UI updates, backend dispatch, config write-back,
//! relaying the result). Each derivation gets a fresh [`RequestId`]; progress
//! and completion for any other id are dropped, so a result computed for
//! inputs the user has since edited can never be shown.

mod form;
mod validate;

use std::fmt;

use crate::derive::{DerivationInput, DerivationRequest, DeriveError};
use crate::domain;
use crate::ui::{Field, UiCommand};

pub use form::FormInput;
pub use validate::{
    clamp_cost, clamp_length, parse_counter, validate_record, DEFAULT_COST, DEFAULT_LENGTH,
};

/// Default number of `*` characters in a full progress mask.
pub const DEFAULT_MASK_LEN: usize = 16;

/// Identifier of one derivation, monotonically increasing per orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the orchestrator is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Form editable, nothing shown.
    Idle,
    /// A backend is working on `request_id`; generate is disabled.
    Deriving { request_id: RequestId },
    /// Result available; `masked` hides it behind the progress mask.
    Revealed { masked: bool },
}

/// Work the caller must perform, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Ui(UiCommand),
    /// Start a backend for `input`; report back with `request_id`.
    Derive {
        request_id: RequestId,
        input: DerivationInput,
    },
    /// Persist the settings of a successful derivation.
    SaveConfig {
        domain: String,
        request: DerivationRequest,
    },
    /// Relay the derived password to the embedding page.
    NotifyResult(String),
}

#[derive(Debug)]
struct InFlight {
    request_id: RequestId,
    request: DerivationRequest,
    shown_stars: usize,
}

#[derive(Debug)]
pub struct Orchestrator {
    phase: Phase,
    last_request: u64,
    in_flight: Option<InFlight>,
    alternate_domain: String,
    mask_len: usize,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_LEN)
    }
}

impl Orchestrator {
    pub fn new(mask_len: usize) -> Self {
        Self {
            phase: Phase::Idle,
            last_request: 0,
            in_flight: None,
            alternate_domain: String::new(),
            mask_len,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_deriving(&self) -> bool {
        matches!(self.phase, Phase::Deriving { .. })
    }

    /// The generate action: validate the form and, if complete, start a derivation.
    pub fn generate(&mut self, form: &FormInput) -> Vec<Action> {
        if let Phase::Deriving { request_id } = self.phase {
            tracing::debug!(%request_id, "generate ignored while deriving");
            return Vec::new();
        }

        let mut actions = Vec::new();
        if matches!(self.phase, Phase::Revealed { .. }) {
            actions.push(Action::Ui(UiCommand::ClearResult));
        }
        self.phase = Phase::Idle;

        let length = clamp_length(&form.length);
        let remove_subdomains = !form.disable_tld;
        let typed: String = form.domain.chars().filter(|c| *c != ' ').collect();
        let domain = domain::canonicalize(&typed, remove_subdomains);
        self.alternate_domain = if domain.is_empty() {
            String::new()
        } else {
            domain::alternate(&typed, form.disable_tld)
        };

        actions.push(Action::Ui(UiCommand::SetDomain(domain.clone())));
        actions.push(Action::Ui(UiCommand::SetLength(length)));

        let mut complete = true;
        if form.password.is_empty() {
            actions.push(Action::Ui(UiCommand::FlagMissing(Field::Password)));
            complete = false;
        }
        if domain.is_empty() {
            actions.push(Action::Ui(UiCommand::FlagMissing(Field::Domain)));
            complete = false;
        }
        if !complete {
            return actions;
        }

        let request = DerivationRequest {
            master_password: form.password.clone(),
            master_secret: form.secret.clone(),
            domain,
            length,
            method: form.hash_method(),
            cost_factor: clamp_cost(&form.cost),
            counter: parse_counter(&form.counter),
            remove_subdomains,
        };

        self.last_request += 1;
        let request_id = RequestId(self.last_request);
        tracing::debug!(%request_id, ?request, "derivation started");

        actions.push(Action::Ui(UiCommand::ShowProgress(String::new())));
        actions.push(Action::Derive {
            request_id,
            input: request.to_input(),
        });
        self.phase = Phase::Deriving { request_id };
        self.in_flight = Some(InFlight {
            request_id,
            request,
            shown_stars: 0,
        });
        actions
    }

    /// Backend progress for `request_id`. Stale ids are ignored and the mask never shrinks.
    pub fn progress(&mut self, request_id: RequestId, fraction: f64) -> Vec<Action> {
        let mask_len = self.mask_len;
        let Some(in_flight) = self.current_mut(request_id) else {
            tracing::trace!(%request_id, "stale progress dropped");
            return Vec::new();
        };

        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let stars = ((fraction * mask_len as f64).floor() as usize).max(in_flight.shown_stars);
        in_flight.shown_stars = stars;
        vec![Action::Ui(UiCommand::ShowProgress("*".repeat(stars)))]
    }

    /// Backend completion for `request_id`: persist, relay, reveal.
    pub fn complete(&mut self, request_id: RequestId, password: String) -> Vec<Action> {
        let Some(in_flight) = self.take_current(request_id) else {
            tracing::debug!(%request_id, "stale completion dropped");
            return Vec::new();
        };

        self.phase = Phase::Revealed { masked: true };
        tracing::debug!(%request_id, "derivation complete");
        vec![
            Action::SaveConfig {
                domain: in_flight.request.domain.clone(),
                request: in_flight.request,
            },
            Action::NotifyResult(password.clone()),
            Action::Ui(UiCommand::Reveal { password }),
        ]
    }

    /// Backend failure for `request_id`: nothing is shown, the form becomes usable again.
    pub fn fail(&mut self, request_id: RequestId, error: &DeriveError) -> Vec<Action> {
        if self.take_current(request_id).is_none() {
            tracing::debug!(%request_id, "stale failure dropped: {error}");
            return Vec::new();
        }
        tracing::warn!(%request_id, "derivation failed: {error}");
        self.phase = Phase::Idle;
        vec![Action::Ui(UiCommand::ClearResult)]
    }

    /// A tracked input was edited: drop any result and any in-flight request.
    pub fn input_changed(&mut self, field: Field) -> Vec<Action> {
        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(request_id = %abandoned.request_id, ?field, "derivation abandoned");
        }
        self.phase = Phase::Idle;
        vec![
            Action::Ui(UiCommand::ClearResult),
            Action::Ui(UiCommand::ClearMissing),
        ]
    }

    /// Show or hide a revealed password. No effect in other phases.
    pub fn toggle_mask(&mut self) -> Vec<Action> {
        match self.phase {
            Phase::Revealed { masked } => {
                self.phase = Phase::Revealed { masked: !masked };
                vec![Action::Ui(UiCommand::SetMasked(!masked))]
            }
            Phase::Idle | Phase::Deriving { .. } => Vec::new(),
        }
    }

    /// Swap the shown domain with the one remembered for the opposite
    /// subdomain policy. Returns the domain to display, if one was remembered.
    pub fn toggle_alternate_domain(&mut self, current: &str) -> Option<String> {
        let previous = std::mem::replace(&mut self.alternate_domain, current.to_string());
        (!previous.is_empty()).then_some(previous)
    }

    fn current_mut(&mut self, request_id: RequestId) -> Option<&mut InFlight> {
        self.in_flight
            .as_mut()
            .filter(|f| f.request_id == request_id)
    }

    fn take_current(&mut self, request_id: RequestId) -> Option<InFlight> {
        if self.in_flight.as_ref().map(|f| f.request_id) == Some(request_id) {
            self.in_flight.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
