use egui::{Color32, RichText};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::OrbitCamera;
use crate::config::EditorConfig;
use crate::dialog::AddDialog;
use crate::generator::generate_batch;
use crate::list_view;
use crate::selection::Selection;
use crate::store::ObjectStore;
use crate::types::PrimitiveKind;
use crate::viewport::{Viewport, ViewportStyle};

const SIDEBAR_FILL: Color32 = Color32::GRAY;
const BUTTON_HEIGHT: f32 = 32.0;
const FIELD_WIDTH: f32 = 70.0;
const DIALOG_WIDTH: f32 = 260.0;

/// Every user intent the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    OpenAddDialog,
    ConfirmAdd,
    CancelAdd,
    Clear,
    Select(usize),
}

/// Store, selection and dialog state plus the views drawn over them
pub struct SceneEditor {
    store: ObjectStore,
    selection: Selection,
    dialog: AddDialog,
    viewport: Viewport,
    rng: StdRng,
    sidebar_fraction: f32,
}

impl SceneEditor {
    pub fn new(config: &EditorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let camera = OrbitCamera::looking_at(
            Vec3::from_array(config.camera_position),
            Vec3::ZERO,
            config.fov_degrees,
        );
        let style = ViewportStyle {
            highlight: config.highlight(),
            background: config.background(),
        };
        Self::with_parts(Viewport::new(camera, style), rng, config.sidebar_fraction)
    }

    pub fn with_parts(viewport: Viewport, rng: StdRng, sidebar_fraction: f32) -> Self {
        Self {
            store: ObjectStore::new(),
            selection: Selection::default(),
            dialog: AddDialog::new(),
            viewport,
            rng,
            sidebar_fraction,
        }
    }

    /// Deterministic editor with default settings
    pub fn seeded(seed: u64) -> Self {
        Self::with_parts(Viewport::default(), StdRng::seed_from_u64(seed), 0.3)
    }

    /// Repaint `ctx` whenever the store changes
    pub fn attach_repaint(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.store.subscribe(move |_| ctx.request_repaint());
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn dialog(&self) -> &AddDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut AddDialog {
        &mut self.dialog
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Apply one action; returns true when visible state changed
    ///
    /// While the Add dialog is open it is modal: only confirm and cancel are
    /// honoured.
    pub fn apply(&mut self, action: EditorAction) -> bool {
        if self.dialog.is_open()
            && !matches!(action, EditorAction::ConfirmAdd | EditorAction::CancelAdd)
        {
            log::debug!("ignoring {:?} while the add dialog is open", action);
            return false;
        }

        match action {
            EditorAction::OpenAddDialog => {
                self.dialog.open();
                true
            }
            EditorAction::ConfirmAdd => {
                let request = self.dialog.draft.request();
                let batch = match generate_batch(&request.shape, request.count, self.store.next_id(), &mut self.rng) {
                    Ok(batch) => batch,
                    Err(err) => {
                        // Store and dialog stay as they were so the count can be corrected
                        log::warn!("add rejected: {}", err);
                        return false;
                    }
                };
                log::info!(
                    "adding {} x {} ({} x {} x {})",
                    request.count,
                    request.shape.kind,
                    request.shape.width,
                    request.shape.height,
                    request.shape.depth
                );
                self.store.append(batch);
                self.dialog.confirm();
                true
            }
            EditorAction::CancelAdd => {
                let was_open = self.dialog.is_open();
                self.dialog.cancel();
                was_open
            }
            EditorAction::Clear => {
                // Selection is left as is; stale indices render as no highlight
                self.store.clear();
                true
            }
            EditorAction::Select(index) => {
                let before = self.selection;
                self.selection.select(index);
                log::debug!("selected {}", index);
                before != self.selection
            }
        }
    }

    /// Draw the whole editor for one frame and apply what the user did
    pub fn show(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        let sidebar_width = ctx.available_rect().width() * self.sidebar_fraction;
        egui::SidePanel::left("primitive_list")
            .resizable(false)
            .exact_width(sidebar_width)
            .frame(egui::Frame::NONE.fill(SIDEBAR_FILL).inner_margin(egui::Margin::same(10)))
            .show(ctx, |ui| self.show_sidebar(ui, &mut actions));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(index) = self.viewport.show(ui, &self.store, self.selection) {
                    actions.push(EditorAction::Select(index));
                }
            });

        if self.dialog.is_open() {
            self.show_dialog(ctx, &mut actions);
        }

        let mut changed = false;
        for action in actions {
            changed |= self.apply(action);
        }
        if changed {
            ctx.request_repaint();
        }
    }

    fn show_sidebar(&self, ui: &mut egui::Ui, actions: &mut Vec<EditorAction>) {
        let list_height = (ui.available_height() - BUTTON_HEIGHT - ui.spacing().item_spacing.y * 2.0).max(0.0);

        egui::ScrollArea::vertical()
            .max_height(list_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(index) = list_view::show(ui, &self.store) {
                    actions.push(EditorAction::Select(index));
                }
            });

        ui.add_space(ui.spacing().item_spacing.y);
        ui.horizontal(|ui| {
            let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
            if ui.add_sized([width, BUTTON_HEIGHT], sidebar_button("Add Primitive")).clicked() {
                actions.push(EditorAction::OpenAddDialog);
            }
            if ui.add_sized([width, BUTTON_HEIGHT], sidebar_button("Clear")).clicked() {
                actions.push(EditorAction::Clear);
            }
        });
    }

    fn show_dialog(&mut self, ctx: &egui::Context, actions: &mut Vec<EditorAction>) {
        let draft = &mut self.dialog.draft;

        let modal = egui::Modal::new(egui::Id::new("add_primitive")).show(ctx, |ui| {
            ui.set_width(DIALOG_WIDTH);
            ui.heading("Add Primitive");
            ui.add_space(20.0);

            egui::ComboBox::from_label("Type")
                .selected_text(draft.kind.label())
                .show_ui(ui, |ui| {
                    for kind in PrimitiveKind::ALL {
                        ui.selectable_value(&mut draft.kind, kind, kind.label());
                    }
                });

            ui.horizontal(|ui| {
                number_field(ui, "Width", &mut draft.width);
                number_field(ui, "Height", &mut draft.height);
                number_field(ui, "Depth", &mut draft.depth);
            });
            number_field(ui, "Count", &mut draft.count);

            ui.separator();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Add").clicked() {
                    actions.push(EditorAction::ConfirmAdd);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(EditorAction::CancelAdd);
                }
            });
        });

        // Escape or a click on the backdrop
        if modal.should_close() {
            actions.push(EditorAction::CancelAdd);
        }
    }
}

fn sidebar_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text.to_owned()).color(Color32::BLACK)).fill(Color32::WHITE)
}

fn number_field(ui: &mut egui::Ui, label: &str, text: &mut String) {
    ui.vertical(|ui| {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(text).desired_width(FIELD_WIDTH));
    });
}
