use colored::Colorize;

use crate::{
  task::Task,
  time::{format_timestamp, format_timestamp_full},
  TaskStore,
};

pub const COMPLETED_MARK: &str = "\u{2713}";
pub const PENDING_MARK: &str = "\u{2613}";

/// Glyph for pending tasks; Windows consoles get a plain `x`.
pub fn pending_mark() -> &'static str {
  match cfg!(windows) {
    true => "x",
    false => PENDING_MARK,
  }
}

pub fn status_mark(task: &Task) -> &'static str {
  match task.is_completed() {
    true => COMPLETED_MARK,
    false => pending_mark(),
  }
}

pub struct Viewer<'a> {
  store: &'a TaskStore,
}

impl<'a> Viewer<'a> {
  pub fn new(store: &'a TaskStore) -> Self {
    Self { store }
  }

  pub fn print_tasks(&self, tasks: &[Task]) {
    println!();
    print!("{}", self.tasks_table(tasks));
    println!();
  }

  pub fn tasks_table(&self, tasks: &[Task]) -> String {
    let header = [
      "ID".to_owned(),
      "Description".to_owned(),
      format!("{}/{}", COMPLETED_MARK, pending_mark()),
      "Created".to_owned(),
    ];
    let footer = [
      String::new(),
      format!("Total: {}", self.store.total_tasks()),
      String::new(),
      format!("Pending: {}", self.store.pending_count()),
    ];
    let rows: Vec<[String; 4]> = tasks
      .iter()
      .map(|t| {
        [
          t.id().to_string(),
          t.description().to_owned(),
          status_mark(t).to_owned(),
          format_timestamp(&t.created()),
        ]
      })
      .collect();

    let mut widths = header.clone().map(|cell| width(&cell));
    for row in rows.iter().chain(std::iter::once(&footer)) {
      for (column, cell) in row.iter().enumerate() {
        widths[column] = widths[column].max(width(cell));
      }
    }

    let separator = format!(
      "+{}+\n",
      widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+")
    );

    let mut table = String::new();
    table.push_str(&separator);
    table.push_str(&format_row(&header, &widths, true));
    table.push_str(&separator);
    for row in rows.iter() {
      table.push_str(&format_row(row, &widths, false));
      table.push_str(&separator);
    }
    table.push_str(&format_row(&footer, &widths, true));
    return table;
  }

  pub fn print_task(&self, task: &Task) {
    println!();
    print!("{}", task_details(task));
    println!();
  }
}

pub fn task_details(task: &Task) -> String {
  let status = match task.completed() {
    Some(completed) => format!("{} completed at {}", COMPLETED_MARK, format_timestamp_full(&completed)),
    None => format!("{} pending", pending_mark()),
  };

  let lines = [
    "Task Details view".bold().to_string(),
    "-".repeat(32),
    format!("ID: {}", task.id()),
    format!("UID: {}", task.uid()),
    format!("Description: {}", task.description()),
    format!("Tag: {}", task.tag().unwrap_or_default()),
    format!("Status: {}", status),
    format!("Created: {}", format_timestamp_full(&task.created())),
    format!("Updated: {}", format_timestamp_full(&task.updated())),
  ];
  lines.iter().map(|line| format!("{}\n", line)).collect()
}

pub fn success_text(text: &str) {
  println!("{}", format!(" {} ", text).bold().white().on_green());
}

pub fn warning_text(text: &str) {
  println!("{}", format!(" {} ", text).bold().black().on_yellow());
}

pub fn error_text(text: &str) {
  eprintln!("{}", format!(" {} ", text).bold().white().on_red());
}

// One column per char: borders line up for narrow glyphs only, CJK text and
// emoji render wider than they are counted.
fn width(cell: &str) -> usize {
  cell.chars().count()
}

fn format_row(cells: &[String; 4], widths: &[usize; 4], bold: bool) -> String {
  let formatted: Vec<String> = cells
    .iter()
    .zip(widths.iter())
    .map(|(cell, w)| {
      let padded = format!("{}{}", cell, " ".repeat(w - width(cell)));
      match bold {
        true => padded.bold().to_string(),
        false => padded,
      }
    })
    .collect();
  format!("| {} |\n", formatted.join(" | "))
}
