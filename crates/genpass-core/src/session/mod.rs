//! One open generator.
//!
//! [`Session`] owns the pieces a running generator needs (orchestrator,
//! bookmarklet channel, config store, UI binding, backends, asset fetcher)
//! and routes [`SessionEvent`]s between them. Backend work and asset fetches
//! run as tokio tasks and report back through an internal queue; drive the
//! session by feeding each [`Completion`] from [`Session::next_completion`]
//! into [`Session::on_completion`], or call [`Session::settle`] to drain
//! everything in flight.

mod fetch;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::channel::{Channel, Inbound, MessagePort, DEFAULT_LATEST_VERSION};
use crate::config::{ConfigRecord, ConfigStore, Storage};
use crate::derive::{identicon_seed, Backends, DerivationInput, DeriveError, HashMethod, Progress};
use crate::domain;
use crate::locale;
use crate::orchestrator::{validate_record, Action, Orchestrator, Phase, RequestId, DEFAULT_MASK_LEN};
use crate::settings::GenpassSettings;
use crate::ui::{Field, Ui, UiCommand};

pub use fetch::{AssetFetcher, FileFetcher};

/// Install-level knobs a session runs with.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub latest_version: u64,
    /// Passed to the [`AssetFetcher`] when an outdated bookmarklet says hello.
    pub bookmarklet_location: String,
    pub mask_len: usize,
    pub language: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        GenpassSettings::default().into()
    }
}

impl From<&GenpassSettings> for SessionOptions {
    fn from(settings: &GenpassSettings) -> Self {
        Self {
            latest_version: settings.latest_bookmarklet_version,
            bookmarklet_location: settings.bookmarklet_asset.clone(),
            mask_len: settings.mask_length,
            language: settings.language.clone(),
        }
    }
}

impl From<GenpassSettings> for SessionOptions {
    fn from(settings: GenpassSettings) -> Self {
        Self::from(&settings)
    }
}

/// Something the user or the embedding page did.
#[derive(Debug)]
pub enum SessionEvent<P> {
    /// The generate control was activated with the current form contents.
    Generate(crate::orchestrator::FormInput),
    /// A tracked input was edited.
    InputChanged(Field),
    /// Password, secret or method changed; refreshes the identicon.
    CredentialsEdited {
        password: String,
        secret: String,
        method: HashMethod,
    },
    MethodSelected(HashMethod),
    /// The subdomain checkbox flipped while `current_domain` was shown.
    DisableTldToggled { current_domain: String },
    ToggleMask,
    ToggleAdvanced,
    /// A cross-context message arrived.
    Message {
        source: P,
        origin: String,
        data: String,
    },
}

/// Result of background work, fed back through [`Session::on_completion`].
#[derive(Debug)]
pub enum Completion {
    Progress {
        request_id: RequestId,
        fraction: f64,
    },
    Derived {
        request_id: RequestId,
        result: Result<String, DeriveError>,
    },
    AssetFetched(anyhow::Result<String>),
}

pub struct Session<S, P, U> {
    orchestrator: Orchestrator,
    channel: Channel<P>,
    store: ConfigStore<S>,
    ui: U,
    backends: Backends,
    fetcher: Arc<dyn AssetFetcher>,
    options: SessionOptions,
    config: ConfigRecord,
    method: HashMethod,
    pending_fetches: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: Storage, P: MessagePort, U: Ui> Session<S, P, U> {
    pub fn new(
        store: ConfigStore<S>,
        ui: U,
        backends: Backends,
        fetcher: Arc<dyn AssetFetcher>,
        options: SessionOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mask_len = if options.mask_len == 0 {
            DEFAULT_MASK_LEN
        } else {
            options.mask_len
        };
        let latest_version = if options.latest_version == 0 {
            DEFAULT_LATEST_VERSION
        } else {
            options.latest_version
        };
        Self {
            orchestrator: Orchestrator::new(mask_len),
            channel: Channel::new(latest_version),
            store,
            ui,
            backends,
            fetcher,
            options,
            config: ConfigRecord::default(),
            method: HashMethod::default(),
            pending_fetches: 0,
            tx,
            rx,
        }
    }

    /// Open the generator for a page reached from `referrer`.
    pub fn start(&mut self, referrer: &str) {
        let domain = domain::classify_referrer(referrer, false);
        self.start_with_domain(&domain);
    }

    /// Seed the form for `domain` from the config store.
    pub fn start_with_domain(&mut self, domain: &str) {
        self.config = self.store.load(domain);
        self.method = self.config.method;
        tracing::debug!(domain, config = ?self.config, "session started");

        self.ui.apply(UiCommand::SetDomain(domain.to_string()));
        self.ui
            .apply(UiCommand::ApplyConfig(validate_record(self.config.clone())));
        if let Some(localization) = self.options.language.as_deref().and_then(locale::lookup) {
            self.ui.apply(UiCommand::Localize(localization));
        }
        self.ui
            .apply(UiCommand::ShowCostField(self.method.is_async()));
    }

    pub fn handle(&mut self, event: SessionEvent<P>) {
        match event {
            SessionEvent::Generate(form) => {
                self.method = form.hash_method();
                let actions = self.orchestrator.generate(&form);
                self.execute(actions);
            }
            SessionEvent::InputChanged(field) => {
                let actions = self.orchestrator.input_changed(field);
                self.execute(actions);
            }
            SessionEvent::CredentialsEdited {
                password,
                secret,
                method,
            } => match identicon_seed(&password, &secret, method) {
                Some(seed) => self.ui.apply(UiCommand::ShowIdenticon(seed)),
                None => self.ui.apply(UiCommand::HideIdenticon),
            },
            SessionEvent::MethodSelected(method) => {
                self.method = method;
                let actions = self.orchestrator.input_changed(Field::Method);
                self.execute(actions);
                self.ui.apply(UiCommand::ShowCostField(method.is_async()));
                self.send_height();
            }
            SessionEvent::DisableTldToggled { current_domain } => {
                if let Some(domain) = self.orchestrator.toggle_alternate_domain(&current_domain) {
                    self.ui.apply(UiCommand::SetDomain(domain));
                }
                let actions = self.orchestrator.input_changed(Field::DisableTld);
                self.execute(actions);
            }
            SessionEvent::ToggleMask => {
                let actions = self.orchestrator.toggle_mask();
                self.execute(actions);
            }
            SessionEvent::ToggleAdvanced => {
                self.ui.apply(UiCommand::ToggleAdvanced);
                self.ui.apply(UiCommand::ShowCostField(self.method.is_async()));
                self.send_height();
            }
            SessionEvent::Message {
                source,
                origin,
                data,
            } => self.on_message(source, &origin, &data),
        }
    }

    /// Wait for the next piece of background work to report.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    pub fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Progress {
                request_id,
                fraction,
            } => {
                let actions = self.orchestrator.progress(request_id, fraction);
                self.execute(actions);
            }
            Completion::Derived {
                request_id,
                result: Ok(password),
            } => {
                let actions = self.orchestrator.complete(request_id, password);
                self.execute(actions);
            }
            Completion::Derived {
                request_id,
                result: Err(err),
            } => {
                let actions = self.orchestrator.fail(request_id, &err);
                self.execute(actions);
            }
            Completion::AssetFetched(result) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                match result {
                    Ok(bookmarklet) => {
                        self.ui.apply(UiCommand::ShowUpdate { bookmarklet });
                        self.send_height();
                    }
                    Err(err) => tracing::warn!("bookmarklet update not loaded: {err:#}"),
                }
            }
        }
    }

    /// Process completions until no derivation or fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            self.on_completion(completion);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_deriving() || self.pending_fetches > 0
    }

    pub fn phase(&self) -> Phase {
        self.orchestrator.phase()
    }

    /// Effective configuration loaded at start.
    pub fn config(&self) -> &ConfigRecord {
        &self.config
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn channel(&self) -> &Channel<P> {
        &self.channel
    }

    fn on_message(&mut self, source: P, origin: &str, data: &str) {
        let Inbound::Handshake { outdated, .. } = self.channel.receive(source, origin, data) else {
            return;
        };
        if outdated {
            self.fetch_update();
        }

        let domain = domain::canonicalize(origin, !self.config.disable_tld);
        self.ui.apply(UiCommand::SetDomain(domain));
        let actions = self.orchestrator.input_changed(Field::Domain);
        self.execute(actions);
        self.send_height();
    }

    fn execute(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Ui(command) => self.ui.apply(command),
                Action::Derive { request_id, input } => self.spawn_derivation(request_id, input),
                Action::SaveConfig { domain, request } => self.store.save(&domain, &request),
                Action::NotifyResult(password) => {
                    if !self.channel.send_result(&password) {
                        tracing::debug!("no bookmarklet peer, result not relayed");
                    }
                }
            }
        }
    }

    fn spawn_derivation(&self, request_id: RequestId, input: DerivationInput) {
        let backend = self.backends.for_method(input.method);
        let progress_tx = self.tx.clone();
        let progress = Progress::new(move |fraction| {
            let _ = progress_tx.send(Completion::Progress {
                request_id,
                fraction,
            });
        });

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let worker = tokio::spawn(async move { backend.derive(input, progress).await });
            // A panicking backend still resolves the request.
            let result = match worker.await {
                Ok(result) => result,
                Err(err) => Err(DeriveError::Worker(err.to_string())),
            };
            let _ = tx.send(Completion::Derived { request_id, result });
        });
    }

    fn fetch_update(&mut self) {
        let fetcher = Arc::clone(&self.fetcher);
        let location = self.options.bookmarklet_location.clone();
        let tx = self.tx.clone();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = fetcher.fetch(&location).await;
            let _ = tx.send(Completion::AssetFetched(result));
        });
    }

    fn send_height(&self) {
        self.channel.send_height(self.ui.document_height());
    }
}
