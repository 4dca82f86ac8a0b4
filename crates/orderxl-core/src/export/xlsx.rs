//! Workbook writing using umya-spreadsheet.

use std::path::Path;

use tracing::debug;
use umya_spreadsheet::{
    Border, HorizontalAlignmentValues, Pane, PaneStateValues, PaneValues, SheetView, Style,
    VerticalAlignmentValues, Worksheet,
};

use super::sheet::{CellStyle, CellValue, Sheet, column_letter};
use super::{Result, WorkbookWriter};
use crate::error::ExportError;

/// Writes a [`Sheet`] as an `.xlsx` workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookWriter for XlsxWriter {
    fn write(&self, sheet: &Sheet, path: &Path) -> Result<()> {
        let fail = |reason: String| ExportError::Write {
            path: path.to_path_buf(),
            reason,
        };

        let mut book = umya_spreadsheet::new_file();
        let worksheet = book
            .get_sheet_by_name_mut("Sheet1")
            .ok_or_else(|| fail("default worksheet missing".to_string()))?;
        worksheet.set_name(sheet.name());

        for (&(col, row), cell) in sheet.cells() {
            match &cell.value {
                Some(CellValue::Text(text)) => {
                    worksheet
                        .get_cell_mut((col, row))
                        .set_value_string(text.clone());
                }
                Some(CellValue::Number(number)) => {
                    worksheet.get_cell_mut((col, row)).set_value_number(*number);
                }
                None => {}
            }
            if let Some(style) = &cell.style {
                apply_style(worksheet.get_style_mut((col, row)), style);
            }
        }

        for (col, width) in sheet.column_widths() {
            worksheet
                .get_column_dimension_mut(&column_letter(col))
                .set_width(width);
        }

        if sheet.frozen_rows() > 0 {
            freeze_rows(worksheet, sheet.frozen_rows());
        }

        umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| fail(e.to_string()))?;
        debug!("Wrote workbook {}", path.display());
        Ok(())
    }
}

fn argb(rgb: &str) -> String {
    let rgb = rgb.trim_start_matches('#');
    if rgb.len() == 8 {
        rgb.to_uppercase()
    } else {
        format!("FF{}", rgb.to_uppercase())
    }
}

fn apply_style(target: &mut Style, style: &CellStyle) {
    if style.bold {
        target.get_font_mut().set_bold(true);
    }
    if let Some(color) = &style.font_color {
        target.get_font_mut().get_color_mut().set_argb(argb(color));
    }
    if let Some(fill) = &style.fill {
        target.set_background_color(argb(fill));
    }
    if style.centered {
        let alignment = target.get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }
    if style.border {
        let borders = target.get_borders_mut();
        borders.get_left_mut().set_border_style(Border::BORDER_THIN);
        borders.get_right_mut().set_border_style(Border::BORDER_THIN);
        borders.get_top_mut().set_border_style(Border::BORDER_THIN);
        borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
    }
}

fn freeze_rows(worksheet: &mut Worksheet, rows: u32) {
    let mut pane = Pane::default();
    pane.set_vertical_split(rows as f64);
    pane.get_top_left_cell_mut()
        .set_coordinate(format!("A{}", rows + 1));
    pane.set_active_pane(PaneValues::BottomLeft);
    pane.set_state(PaneStateValues::Frozen);

    let views = worksheet.get_sheet_views_mut();
    if views.get_sheet_view_list().is_empty() {
        views.add_sheet_view_list_mut(SheetView::default());
    }
    if let Some(view) = views.get_sheet_view_list_mut().first_mut() {
        view.set_pane(pane);
    }
}
