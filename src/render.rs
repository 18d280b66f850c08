use std::fmt::{self, Write};

use crate::dates::{self, DAYS};
use crate::form::{FieldKey, Guardian};
use crate::schedule::{Entry, ScheduleStore, Slot, WeekRecord};
use crate::status::{Code, Format, Registry};

fn entry_symbols(entry: Entry, registry: &Registry, format: Format) -> String {
    match entry {
        Entry::Single(code) => registry.symbol(code, format).to_string(),
        Entry::Pair([mother, father]) => format!(
            "M:{} F:{}",
            registry.symbol(mother, format),
            registry.symbol(father, format)
        ),
    }
}

fn slot_symbols(week: &WeekRecord, slot: Slot, registry: &Registry, format: Format) -> Vec<String> {
    week.slot(slot)
        .iter()
        .map(|entry| entry_symbols(*entry, registry, format))
        .collect()
}

fn week_rows(week: &WeekRecord, registry: &Registry, format: Format) -> [Vec<String>; 3] {
    let mut date_row = vec![dates::week_label(week.week_start)];
    date_row.extend(dates::weekday_labels(week.week_start));

    let mut am_row = vec!["Pick AM".to_string()];
    am_row.extend(slot_symbols(week, Slot::PickUp1, registry, format));

    let mut pm_row = vec!["Pick PM".to_string()];
    pm_row.extend(slot_symbols(week, Slot::PickUp2, registry, format));

    [date_row, am_row, pm_row]
}

fn header_row() -> Vec<String> {
    let mut header = vec!["Week / Pick Up".to_string()];
    header.extend(DAYS.iter().map(|day| day.to_string()));
    header
}

fn pad_center(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(right))
}

fn write_border(out: &mut String, widths: &[usize]) -> fmt::Result {
    for width in widths {
        write!(out, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(out, "+")
}

fn write_cells(out: &mut String, row: &[String], widths: &[usize]) -> fmt::Result {
    for (cell, width) in row.iter().zip(widths) {
        write!(out, "| {} ", pad_center(cell, *width))?;
    }
    writeln!(out, "|")
}

/// Monospace table of the whole schedule, one date/AM/PM row group per week
/// in store order, with a rule between weeks. Columns are centered.
pub fn render_text(store: &ScheduleStore, registry: &Registry, out: &mut String) -> fmt::Result {
    let header = header_row();
    let groups: Vec<[Vec<String>; 3]> = store
        .weeks()
        .iter()
        .map(|week| week_rows(week, registry, Format::Text))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in groups.iter().flatten() {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_border(out, &widths)?;
    write_cells(out, &header, &widths)?;
    write_border(out, &widths)?;
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            write_border(out, &widths)?;
        }
        for row in group {
            write_cells(out, row, &widths)?;
        }
    }
    write_border(out, &widths)
}

const STYLE: &str = "\
<style>
    body { font-family: Arial, sans-serif; }
    table { border-collapse: collapse; width: 100%; text-align: center; border: 1px solid #ccc; margin-bottom: 20px; }
    th { background-color: #d9ead3; padding: 10px; border: 1px solid #ccc; }
    td { padding: 8px; border: 1px solid #ccc; }
    tr.date-row { background-color: #cfe2f3; font-weight: bold; }
    tr.pickup-row-am { background-color: #f7f7f7; }
    tr.pickup-row-pm { background-color: #ffffff; }
    td.label-cell { font-weight: bold; text-align: left; padding-left: 15px;}
    .status-tick { color: green; font-weight: bold; }
    .status-cross { color: red; font-weight: bold; }
    .status-complicated { color: orange; font-weight: bold; }
    .status-travel { color: blue; font-style: italic; }
    .status-office { color: gray; }
    .status-holiday { color: #DAA520; }
    .status-unknown { color: purple; font-weight: bold; }
    ul.legend { list-style: none; padding: 0; }
    ul.legend li { margin-bottom: 5px; }
    ul.legend span { display: inline-block; min-width: 20px; text-align: center; margin-right: 10px;}
</style>";

fn write_document_head(out: &mut String) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "    <title>Pickup Schedule</title>")?;
    writeln!(out, "{STYLE}")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Pickup Schedule</h1>")
}

fn write_document_tail(out: &mut String) -> fmt::Result {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_table_header(out: &mut String) -> fmt::Result {
    write!(out, "<thead><tr><th>Week / Pick Up</th>")?;
    for day in DAYS {
        write!(out, "<th>{day}</th>")?;
    }
    writeln!(out, "</tr></thead>")
}

fn write_legend(out: &mut String, registry: &Registry) -> fmt::Result {
    writeln!(out, "<h2>Legend</h2>")?;
    writeln!(out, "<ul class='legend'>")?;
    for def in registry.legend_items() {
        writeln!(out, "<li>{} : {}</li>", def.html, def.desc)?;
    }
    writeln!(out, "</ul>")
}

/// Read-only HTML page: the schedule table with status spans plus the legend.
/// Output is byte-deterministic for a given store.
pub fn render_html(store: &ScheduleStore, registry: &Registry, out: &mut String) -> fmt::Result {
    write_document_head(out)?;
    writeln!(out, "<table border='1'>")?;
    write_table_header(out)?;
    writeln!(out, "<tbody>")?;
    for week in store.weeks() {
        let [date_row, am_row, pm_row] = week_rows(week, registry, Format::Html);
        for (class, row) in [
            ("date-row", date_row),
            ("pickup-row-am", am_row),
            ("pickup-row-pm", pm_row),
        ] {
            write!(out, "<tr class='{class}'><td class='label-cell'>{}</td>", row[0])?;
            for cell in &row[1..] {
                write!(out, "<td>{cell}</td>")?;
            }
            writeln!(out, "</tr>")?;
        }
    }
    writeln!(out, "</tbody></table>")?;
    write_legend(out, registry)?;
    write_document_tail(out)
}

fn write_select(out: &mut String, name: &str, code: Code, registry: &Registry) -> fmt::Result {
    write!(out, "<select name='{name}'>")?;
    for def in registry.legend_items() {
        let selected = if def.code == code { " selected" } else { "" };
        write!(
            out,
            "<option value='{}'{selected}>{} {}</option>",
            def.code, def.text, def.desc
        )?;
    }
    write!(out, "</select>")
}

fn write_entry_cell(
    out: &mut String,
    week: usize,
    slot: Slot,
    day: usize,
    entry: Entry,
    registry: &Registry,
) -> fmt::Result {
    write!(out, "<td>")?;
    match entry {
        Entry::Single(code) => {
            let key = FieldKey {
                week,
                slot,
                day,
                guardian: None,
            };
            write_select(out, &key.name(), code, registry)?;
        }
        Entry::Pair([mother, father]) => {
            for (guardian, code) in [(Guardian::Mother, mother), (Guardian::Father, father)] {
                let key = FieldKey {
                    week,
                    slot,
                    day,
                    guardian: Some(guardian),
                };
                write!(out, "{}:", guardian.tag().to_ascii_uppercase())?;
                write_select(out, &key.name(), code, registry)?;
                if guardian == Guardian::Mother {
                    write!(out, " ")?;
                }
            }
        }
    }
    write!(out, "</td>")
}

/// Editable page served at `/`: every status cell is a `<select>` named with
/// its field key, wrapped in one form that posts back to `/`. Add/remove
/// week controls post to their own endpoints. Also byte-deterministic.
pub fn render_form_page(
    store: &ScheduleStore,
    registry: &Registry,
    out: &mut String,
) -> fmt::Result {
    write_document_head(out)?;
    writeln!(out, "<form method='post' action='/'>")?;
    writeln!(out, "<table border='1'>")?;
    write_table_header(out)?;
    writeln!(out, "<tbody>")?;
    for (w, week) in store.weeks().iter().enumerate() {
        write!(
            out,
            "<tr class='date-row'><td class='label-cell'>{}</td>",
            dates::week_label(week.week_start)
        )?;
        for label in dates::weekday_labels(week.week_start) {
            write!(out, "<td>{label}</td>")?;
        }
        writeln!(out, "</tr>")?;

        for (class, label, slot) in [
            ("pickup-row-am", "Pick AM", Slot::PickUp1),
            ("pickup-row-pm", "Pick PM", Slot::PickUp2),
        ] {
            write!(out, "<tr class='{class}'><td class='label-cell'>{label}</td>")?;
            for (day, entry) in week.slot(slot).iter().enumerate() {
                write_entry_cell(out, w, slot, day, *entry, registry)?;
            }
            writeln!(out, "</tr>")?;
        }
    }
    writeln!(out, "</tbody></table>")?;
    writeln!(out, "<button type='submit'>Save</button>")?;
    writeln!(out, "</form>")?;

    writeln!(out, "<form method='post' action='/add_week'>")?;
    writeln!(out, "<button type='submit'>Add week</button>")?;
    writeln!(out, "</form>")?;
    for (w, week) in store.weeks().iter().enumerate() {
        writeln!(out, "<form method='post' action='/remove_week/{w}'>")?;
        writeln!(
            out,
            "<button type='submit'>Remove {}</button>",
            dates::week_label(week.week_start)
        )?;
        writeln!(out, "</form>")?;
    }

    write_legend(out, registry)?;
    write_document_tail(out)
}
