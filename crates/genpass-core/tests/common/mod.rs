//! Test doubles for driving a [`Session`](genpass_core::session::Session)
//! without widgets, pages or real hashing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use genpass_core::channel::MessagePort;
use genpass_core::config::{MemoryStorage, Storage, StorageError};
use genpass_core::derive::{Backend, DerivationInput, DeriveError, Progress};
use genpass_core::session::AssetFetcher;
use genpass_core::ui::{Ui, UiCommand};
use tokio::sync::Notify;

pub const DOCUMENT_HEIGHT: u32 = 480;

/// UI that records every command.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub commands: Vec<UiCommand>,
}

impl RecordingUi {
    pub fn reveals(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::Reveal { password } => Some(password.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn masks(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::ShowProgress(mask) => Some(mask.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Ui for RecordingUi {
    fn apply(&mut self, command: UiCommand) {
        self.commands.push(command);
    }

    fn document_height(&self) -> u32 {
        DOCUMENT_HEIGHT
    }
}

/// Message port shared with the test: `(payload, target_origin)` pairs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingPort {
    pub fn payloads(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl MessagePort for RecordingPort {
    fn post_message(&self, payload: &str, target_origin: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((payload.to_string(), target_origin.to_string()));
    }
}

/// Memory storage that counts writes.
#[derive(Debug, Default)]
pub struct CountingStorage {
    pub inner: MemoryStorage,
    pub writes: usize,
}

impl Storage for CountingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        self.inner.set_item(key, value)
    }
}

/// Reports 0.25 and 0.5, then resolves with a fixed password.
pub struct ScriptedBackend;

#[async_trait]
impl Backend for ScriptedBackend {
    async fn derive(&self, _input: DerivationInput, progress: Progress) -> Result<String, DeriveError> {
        progress.report(0.25);
        tokio::task::yield_now().await;
        progress.report(0.5);
        Ok("abcd1234".to_string())
    }
}

/// Resolves only after the gate is opened.
pub struct GatedBackend {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl Backend for GatedBackend {
    async fn derive(&self, input: DerivationInput, _progress: Progress) -> Result<String, DeriveError> {
        self.gate.notified().await;
        Ok(format!("late-{}", input.domain))
    }
}

pub struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    async fn derive(&self, _input: DerivationInput, progress: Progress) -> Result<String, DeriveError> {
        progress.report(0.5);
        Err(DeriveError::Worker("hashing worker gone".to_string()))
    }
}

pub struct PanickingBackend;

#[async_trait]
impl Backend for PanickingBackend {
    async fn derive(&self, _input: DerivationInput, _progress: Progress) -> Result<String, DeriveError> {
        panic!("backend bug");
    }
}

/// Fetcher returning a fixed asset and counting calls.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFetcher for StubFetcher {
    async fn fetch(&self, location: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("javascript:/*{location}*/void(0)"))
    }
}
