//! Static demo workbooks and their XLSX rendering.
//!
//! Workbook content does not depend on the request. Both templates pin the
//! workbook creation time so repeated renders are byte-identical.

use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatBorder, FormatPattern, Formula, Workbook,
    XlsxError,
};

use crate::error::GenerationError;

pub const BULK_SHEET_NAME: &str = "range names";
pub const BULK_ROW_COUNT: u32 = 39;
pub const BULK_COLUMN_COUNT: u16 = 600;

pub const PI_SHEET_NAME: &str = "Pi";
pub const PI_CELL: (u32, u16) = (5, 6);
#[allow(clippy::approx_constant)]
pub const PI_VALUE: f64 = 3.14;

pub const DATA_SHEET_NAME: &str = "Data";
pub const DATA_FIRST_ROW: u32 = 10;
pub const DATA_LAST_ROW: u32 = 19;
pub const DATA_FIRST_COLUMN: u16 = 27;
pub const DATA_LAST_COLUMN: u16 = 53;

pub const INVENTORY_SHEET_NAME: &str = "Inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadsheetTemplate {
    #[default]
    Demo,
    Inventory,
}

impl SpreadsheetTemplate {
    pub const EXPECTED_VALUES: &'static str = "demo, inventory";

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "demo" => Some(Self::Demo),
            "inventory" => Some(Self::Inventory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Inventory => "inventory",
        }
    }

    pub fn render(self) -> Result<Vec<u8>, GenerationError> {
        match self {
            Self::Demo => render_layout(&demo_layout()),
            Self::Inventory => render_inventory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

/// A cell addressed with 1-based row and column numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub column: u16,
    pub value: CellValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl SheetLayout {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: Vec::new(),
        }
    }

    fn push(&mut self, row: u32, column: u16, value: CellValue) {
        self.cells.push(Cell { row, column, value });
    }

    pub fn cell(&self, row: u32, column: u16) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.column == column)
            .map(|cell| &cell.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetLayout {
    pub sheets: Vec<SheetLayout>,
}

impl SpreadsheetLayout {
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// Spreadsheet column letters for a 1-based column number (`1 -> A`, `27 -> AA`).
pub fn column_letter(column: u16) -> String {
    let mut remaining = u32::from(column);
    let mut letters = Vec::new();
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        letters.push(char::from(b'A' + offset as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

pub fn demo_layout() -> SpreadsheetLayout {
    let mut bulk = SheetLayout::new(BULK_SHEET_NAME);
    for row in 1..=BULK_ROW_COUNT {
        for column in 1..=BULK_COLUMN_COUNT {
            bulk.push(row, column, CellValue::Number(f64::from(column - 1)));
        }
    }

    let mut pi = SheetLayout::new(PI_SHEET_NAME);
    pi.push(PI_CELL.0, PI_CELL.1, CellValue::Number(PI_VALUE));

    let mut data = SheetLayout::new(DATA_SHEET_NAME);
    for row in DATA_FIRST_ROW..=DATA_LAST_ROW {
        for column in DATA_FIRST_COLUMN..=DATA_LAST_COLUMN {
            data.push(row, column, CellValue::Text(column_letter(column)));
        }
    }

    SpreadsheetLayout {
        sheets: vec![bulk, pi, data],
    }
}

pub fn render_layout(layout: &SpreadsheetLayout) -> Result<Vec<u8>, GenerationError> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&reproducible_properties()?);

    for sheet in &layout.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for cell in &sheet.cells {
            let (Some(row), Some(column)) = (cell.row.checked_sub(1), cell.column.checked_sub(1))
            else {
                return Err(GenerationError::Rejected(format!(
                    "sheet '{}' has a cell at row {} column {}; positions start at 1",
                    sheet.name, cell.row, cell.column
                )));
            };
            match &cell.value {
                CellValue::Number(value) => {
                    worksheet.write_number(row, column, *value)?;
                }
                CellValue::Text(value) => {
                    worksheet.write_string(row, column, value)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryItem {
    pub id: u32,
    pub product: &'static str,
    pub quantity: u32,
    pub price: f64,
}

impl InventoryItem {
    pub fn value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

pub const INVENTORY_HEADERS: [&str; 5] = ["ID", "Product", "Quantity", "Price", "Value"];

pub const INVENTORY_ITEMS: [InventoryItem; 3] = [
    InventoryItem {
        id: 12001,
        product: "Nails",
        quantity: 37,
        price: 3.99,
    },
    InventoryItem {
        id: 12002,
        product: "Hammer",
        quantity: 5,
        price: 12.10,
    },
    InventoryItem {
        id: 12003,
        product: "Saw",
        quantity: 12,
        price: 15.37,
    },
];

fn render_inventory() -> Result<Vec<u8>, GenerationError> {
    let mut workbook = Workbook::new();
    workbook.set_properties(
        &reproducible_properties()?
            .set_title("Inventory")
            .set_author("Greeting Artifacts")
            .set_comment("Sample inventory workbook with formulas, formats and an autofilter")
            .set_company("AdventureWorks Inc.")
            .set_custom_property("Checked by", "Greeting Artifacts")
            .set_custom_property("AssemblyName", "rust_xlsxwriter"),
    );

    let header_format = Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(0xD9D9D9);
    let id_format = Format::new().set_num_format("@");
    let quantity_format = Format::new().set_num_format("#,##0");
    let amount_format = Format::new().set_num_format("#,##0.00");
    let total_format = Format::new().set_bold().set_border_top(FormatBorder::Thin);
    let total_quantity_format = total_format.clone().set_num_format("#,##0");
    let total_amount_format = total_format.clone().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(INVENTORY_SHEET_NAME)?;

    for (column, header) in INVENTORY_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, *header, &header_format)?;
    }

    for (index, item) in INVENTORY_ITEMS.iter().enumerate() {
        let row = index as u32 + 1;
        let excel_row = row + 1;
        worksheet.write_number_with_format(row, 0, f64::from(item.id), &id_format)?;
        worksheet.write_string(row, 1, item.product)?;
        worksheet.write_number_with_format(row, 2, f64::from(item.quantity), &quantity_format)?;
        worksheet.write_number_with_format(row, 3, item.price, &amount_format)?;
        worksheet.write_formula_with_format(
            row,
            4,
            Formula::new(format!("C{excel_row}*D{excel_row}")),
            &amount_format,
        )?;
    }

    let total_row = INVENTORY_ITEMS.len() as u32 + 1;
    let last_item_row = INVENTORY_ITEMS.len() + 1;
    worksheet.write_blank(total_row, 0, &total_format)?;
    worksheet.write_blank(total_row, 1, &total_format)?;
    for (column, format) in [
        (2u16, &total_quantity_format),
        (3, &total_amount_format),
        (4, &total_amount_format),
    ] {
        let letter = column_letter(column + 1);
        worksheet.write_formula_with_format(
            total_row,
            column,
            Formula::new(format!("SUBTOTAL(9,{letter}2:{letter}{last_item_row})")),
            format,
        )?;
    }

    worksheet.autofilter(0, 0, INVENTORY_ITEMS.len() as u32, 4)?;
    worksheet.autofit();
    worksheet.set_header("&C&24&U&\"Arial,Regular Bold\" Inventory");
    worksheet.set_footer("&L&Z&F&C&A&RPage &P of &N");
    worksheet.set_repeat_rows(0, 1)?;
    worksheet.set_repeat_columns(0, 6)?;
    worksheet.set_view_page_layout();

    Ok(workbook.save_to_buffer()?)
}

fn reproducible_properties() -> Result<DocProperties, XlsxError> {
    let created = ExcelDateTime::from_ymd(2020, 1, 1)?;
    Ok(DocProperties::new().set_creation_datetime(&created))
}
