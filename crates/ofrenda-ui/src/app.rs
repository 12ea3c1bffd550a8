//! Ofrenda Application
//!
//! Layout:
//! ┌───────────────────────────────────┐
//! │  Header: title, add, refresh      │
//! ├───────────────────────────────────┤
//! │                                   │
//! │  Altar: 4 x 3 picture frames      │
//! │                                   │
//! └───────────────────────────────────┘
//!
//! Dialogs (entry form, detail, confirmation, notice) float above the altar.
//! Every interaction becomes an `AppEvent`; commands are spawned and their
//! result events are collected by `check_pending_requests` each frame.

use crate::modals::{confirm, detail, entry_form, notice};
use crate::panels::altar;
use egui::{Color32, RichText};
use ofrenda::app::{execute_command, AppCommand};
use ofrenda::form::FormCodec;
use ofrenda::{AppEvent, AppState, ClientConfig, HttpDataClient, ReadyStatus};
use std::sync::{Arc, Mutex};
use tracing::debug;

type PendingEvent = Arc<Mutex<Option<AppEvent>>>;

/// Main application state
pub struct OfrendaApp {
    state: AppState,
    client: HttpDataClient,

    // Async result holders, one per spawned command
    pending: Vec<PendingEvent>,

    ctx: egui::Context,

    // Tokio runtime for native builds
    #[cfg(not(target_arch = "wasm32"))]
    runtime: Arc<tokio::runtime::Runtime>,
}

impl OfrendaApp {
    /// Create the app without loading anything yet
    pub fn new(ctx: &egui::Context, config: ClientConfig) -> anyhow::Result<Self> {
        let client = HttpDataClient::new(&config)?;

        let repaint = ctx.clone();
        let codec = FormCodec::new(config.assets.default_photo.clone())
            .with_preview_hook(Arc::new(move |_| repaint.request_repaint()));
        let state = AppState::with_codec(config.assets.clone(), codec);

        #[cfg(not(target_arch = "wasm32"))]
        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()?,
        );

        Ok(Self {
            state,
            client,
            pending: Vec::new(),
            ctx: ctx.clone(),
            #[cfg(not(target_arch = "wasm32"))]
            runtime,
        })
    }

    /// Browser entry: API at the page origin, initial load started
    #[cfg(target_arch = "wasm32")]
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let base_url = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| ofrenda::config::DEFAULT_API_URL.to_string());

        let mut app = Self::new(&cc.egui_ctx, ClientConfig::new(base_url))?;
        app.emit(AppEvent::Bootstrap);
        Ok(app)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle an event and spawn the commands it queued
    pub fn emit(&mut self, event: AppEvent) {
        self.state.handle_event(event);
        for command in self.state.take_commands() {
            self.spawn(command);
        }
    }

    // =========================================================================
    // API CALLS
    // =========================================================================

    fn spawn(&mut self, command: AppCommand) {
        debug!("Spawning {:?}", command);
        let client = self.client.clone();
        let ctx = self.ctx.clone();
        let result = Arc::new(Mutex::new(None));
        let result_clone = result.clone();

        let task = async move {
            let event = execute_command(&client, command).await;
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(event);
            }
            ctx.request_repaint();
        };

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(task);

        #[cfg(not(target_arch = "wasm32"))]
        self.runtime.spawn(task);

        self.pending.push(result);
    }

    // =========================================================================
    // ASYNC RESULT HANDLING
    // =========================================================================

    /// Feed finished command results back in as events
    pub fn check_pending_requests(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|pending| {
            match pending.try_lock().ok().and_then(|mut g| g.take()) {
                Some(event) => {
                    finished.push(event);
                    false
                }
                None => true,
            }
        });

        for event in finished {
            self.emit(event);
        }
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Draw one frame
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.check_pending_requests();

        let mut events: Vec<AppEvent> = Vec::new();

        // Dialogs first so they sit above the altar
        if let Some(notice) = &self.state.notice {
            events.extend(notice::show(ctx, notice));
        }
        if let Some(confirmation) = self.state.dialog.confirmation() {
            events.extend(confirm::show(ctx, confirmation));
        }
        if let Some(view) = self.state.detail_view() {
            if let Some(entry) = self.state.dialog.detail_entry().cloned() {
                events.extend(detail::show(ctx, &view, entry, self.client.base_url()));
            }
        }
        events.extend(entry_form::show(
            ctx,
            &mut self.state.dialog,
            self.client.base_url(),
        ));

        let status = self.state.status;
        let busy = self.state.has_pending_async();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Ofrenda").strong().size(20.0));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⟳ Refresh").clicked() {
                        events.push(AppEvent::Refresh);
                    }
                    if status.shows_create()
                        && ui
                            .add_enabled(!self.state.dialog.is_busy(), egui::Button::new("+ Add"))
                            .clicked()
                    {
                        events.push(AppEvent::OpenCreate);
                    }
                    if busy {
                        ui.spinner();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match status {
            ReadyStatus::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
            ReadyStatus::NotReady => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(
                        RichText::new("The ofrenda is not ready")
                            .size(16.0)
                            .color(Color32::from_rgb(251, 191, 36)),
                    );
                    ui.label(
                        RichText::new("The memorial service could not be reached.")
                            .color(Color32::GRAY),
                    );
                    ui.add_space(8.0);
                    if ui.button("Try again").clicked() {
                        events.push(AppEvent::Refresh);
                    }
                });
            }
            ReadyStatus::Ready => {
                let grid = self.state.grid();
                let locked = self.state.dialog.is_busy();
                if let Some(event) = altar::show(ui, &grid, self.client.base_url(), locked) {
                    events.push(event);
                }
            }
        });

        for event in events {
            self.emit(event);
        }

        if busy {
            ctx.request_repaint();
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl eframe::App for OfrendaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
