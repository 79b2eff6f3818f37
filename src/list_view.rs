use egui::{Color32, RichText, Sense, Stroke};

use crate::math::Rgb;
use crate::store::ObjectStore;
use crate::types::PrimitiveRecord;

pub const HEADER: &str = "List of Primitives";

const BADGE_SIZE: egui::Vec2 = egui::vec2(50.0, 30.0);
const SWATCH_SIZE: egui::Vec2 = egui::vec2(20.0, 20.0);

/// Display data of one list row
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub index: usize,
    pub number: usize,
    pub title: String,
    pub position_label: String,
    pub swatch: Rgb,
}

impl ListRow {
    pub fn new(index: usize, record: &PrimitiveRecord) -> Self {
        let number = index + 1;
        Self {
            index,
            number,
            title: format!("{} {}", record.kind, number),
            position_label: position_label(record),
            swatch: record.color,
        }
    }
}

/// `"Pos: x, y, z"` with one decimal per axis
pub fn position_label(record: &PrimitiveRecord) -> String {
    let p = record.position;
    format!("Pos: {}, {}, {}", one_decimal(p.x), one_decimal(p.y), one_decimal(p.z))
}

/// One fixed decimal, exact halves rounded away from zero
fn one_decimal(value: f32) -> String {
    let value = f64::from(value);
    // `{:.1}` breaks exact ties to even; in binary they are the odd quarters
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{:.1}", value)
}

/// One row per record, in store order
pub fn rows(store: &ObjectStore) -> Vec<ListRow> {
    store
        .iter()
        .enumerate()
        .map(|(index, record)| ListRow::new(index, record))
        .collect()
}

fn show_row(ui: &mut egui::Ui, row: &ListRow) -> egui::Response {
    let inner = ui.horizontal(|ui| {
        let (badge, _) = ui.allocate_exact_size(BADGE_SIZE, Sense::hover());
        ui.painter().rect_filled(badge, 5.0, Color32::BLACK);
        ui.painter().text(
            badge.center(),
            egui::Align2::CENTER_CENTER,
            row.number.to_string(),
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );

        ui.vertical(|ui| {
            ui.label(RichText::new(&row.title).strong());
            ui.label(RichText::new(&row.position_label).small());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (swatch, _) = ui.allocate_exact_size(SWATCH_SIZE, Sense::hover());
            ui.painter().rect_filled(swatch, 0.0, row.swatch.to_color32());
            ui.painter().rect_stroke(
                swatch,
                0.0,
                Stroke::new(1.0, Color32::BLACK),
                egui::StrokeKind::Inside,
            );
        });
    });

    inner.response.interact(Sense::click())
}

/// Draw the list; returns the index of a clicked row
pub fn show(ui: &mut egui::Ui, store: &ObjectStore) -> Option<usize> {
    let mut clicked = None;

    ui.label(RichText::new(HEADER).strong());
    ui.separator();

    for row in rows(store) {
        if show_row(ui, &row).clicked() {
            clicked = Some(row.index);
        }
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;
    use glam::Vec3;

    fn record(kind: PrimitiveKind, position: Vec3) -> PrimitiveRecord {
        PrimitiveRecord {
            id: 0,
            kind,
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            color: Rgb::new(0.1, 0.2, 0.3),
            position,
        }
    }

    #[test]
    fn test_position_label_one_decimal() {
        let r = record(PrimitiveKind::Box, Vec3::new(1.26, -0.04, 2.0));
        assert_eq!(position_label(&r), "Pos: 1.3, -0.0, 2.0");
    }

    #[test]
    fn test_position_label_rounds_halves_away_from_zero() {
        let r = record(PrimitiveKind::Box, Vec3::new(0.25, -0.75, 1.25));
        assert_eq!(position_label(&r), "Pos: 0.3, -0.8, 1.3");

        let r = record(PrimitiveKind::Box, Vec3::new(0.5, -2.0, 0.125));
        assert_eq!(position_label(&r), "Pos: 0.5, -2.0, 0.1");
    }

    #[test]
    fn test_rows_follow_store_order() {
        let mut store = ObjectStore::new();
        store.append(vec![
            record(PrimitiveKind::Box, Vec3::ZERO),
            record(PrimitiveKind::Pyramid, Vec3::ONE),
        ]);

        let rows = rows(&store);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].title, "Box 1");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].title, "Pyramid 2");
        assert_eq!(rows[1].position_label, "Pos: 1.0, 1.0, 1.0");
        assert_eq!(rows[1].swatch, Rgb::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_empty_store_has_no_rows() {
        assert!(rows(&ObjectStore::new()).is_empty());
    }
}
