use log::debug;
use tasker::{
  prompt::confirm,
  storage::JsonStorage,
  viewer::{error_text, pending_mark, success_text, warning_text, Viewer, COMPLETED_MARK},
  Config, TaskStore,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let matches = build_cli().get_matches();

  if let Some(("completions", command_matches)) = matches.subcommand() {
    let shell = *command_matches
      .get_one::<clap_complete::Shell>("shell")
      .expect("shell is required");
    clap_complete::generate(shell, &mut build_cli(), "tasker", &mut std::io::stdout());
    return;
  }

  if let Err(err) = run(&matches) {
    error_text(&err.to_string());
    std::process::exit(1);
  }
}

fn build_cli() -> clap::Command<'static> {
  let id_arg = || {
    clap::Arg::new("id")
      .required(true)
      .index(1)
      .value_parser(clap::value_parser!(u64))
  };
  let words_arg = |index: usize| {
    clap::Arg::new("description")
      .required(true)
      .index(index)
      .multiple_values(true)
      .value_parser(clap::value_parser!(String))
  };

  clap::Command::new("tasker")
    .version(env!("CARGO_PKG_VERSION"))
    .about("Your favourite task list or todo manager")
    .arg(
      clap::Arg::new("yes")
        .short('y')
        .long("yes")
        .global(true)
        .action(clap::ArgAction::SetTrue)
        .help("Don't ask for confirmation"),
    )
    .subcommand(clap::Command::new("ls").visible_alias("l").about("Show all tasks"))
    .subcommand(
      clap::Command::new("add")
        .visible_alias("a")
        .about("Add a new task to the list")
        .args(&[
          words_arg(1),
          clap::Arg::new("tag")
            .short('t')
            .long("tag")
            .takes_value(true)
            .value_parser(clap::value_parser!(String)),
        ]),
    )
    .subcommand(
      clap::Command::new("pending")
        .visible_alias("p")
        .about("Show pending tasks, or mark the task of ID as pending")
        .arg(id_arg().required(false)),
    )
    .subcommand(
      clap::Command::new("undo")
        .visible_alias("i")
        .about("Mark the task of ID as pending")
        .arg(id_arg()),
    )
    .subcommand(
      clap::Command::new("done")
        .visible_aliases(&["c", "d"])
        .about("Mark the task of ID as completed")
        .arg(id_arg()),
    )
    .subcommand(
      clap::Command::new("edit")
        .visible_aliases(&["e", "m", "u"])
        .about("Modify the description of a task")
        .args(&[id_arg(), words_arg(2)]),
    )
    .subcommand(
      clap::Command::new("tag")
        .about("Set the tag of a task, or clear it when no tag is given")
        .args(&[
          id_arg(),
          clap::Arg::new("tag")
            .index(2)
            .value_parser(clap::value_parser!(String)),
        ]),
    )
    .subcommand(
      clap::Command::new("show")
        .visible_alias("s")
        .about("Show detail view of the task of ID")
        .arg(id_arg()),
    )
    .subcommand(
      clap::Command::new("rm")
        .visible_alias("r")
        .about("Remove the task of ID from the list")
        .arg(id_arg()),
    )
    .subcommand(
      clap::Command::new("del")
        .visible_alias("delete")
        .about("Remove the latest task from the list"),
    )
    .subcommand(clap::Command::new("flush").about("Remove every task"))
    .subcommand(
      clap::Command::new("completions")
        .about("Print shell completions")
        .arg(
          clap::Arg::new("shell")
            .required(true)
            .index(1)
            .value_parser(clap::value_parser!(clap_complete::Shell)),
        ),
    )
}

fn run(matches: &clap::ArgMatches) -> CliResult {
  let config = Config::load()?;
  let mut store = TaskStore::open(Box::new(JsonStorage::new(&config.storage_path)))?;
  debug!("store location: {}", store.location());

  let skip_confirmation = is_flag_set(matches, "yes")
    || matches
      .subcommand()
      .map_or(false, |(_, command_matches)| is_flag_set(command_matches, "yes"));

  match matches.subcommand() {
    None | Some(("ls", _)) => {
      Viewer::new(&store).print_tasks(&store.all_tasks());
    }

    Some(("add", command_matches)) => {
      let description = joined_words(command_matches);
      let tag = command_matches.get_one::<String>("tag").map(|t| t.as_str());
      let task = store.add(&description, tag)?;
      success_text(&format!("Added to list: {} (id: {})", task.description(), task.id()));
    }

    Some(("pending", command_matches)) => match command_matches.get_one::<u64>("id") {
      Some(id) => mark_as_pending(&mut store, *id)?,
      None => Viewer::new(&store).print_tasks(&store.pending_tasks()),
    },

    Some(("undo", command_matches)) => {
      mark_as_pending(&mut store, task_id(command_matches))?;
    }

    Some(("done", command_matches)) => {
      let task = store.mark_as_complete(task_id(command_matches))?;
      success_text(&format!("{} {}", COMPLETED_MARK, task.description()));
    }

    Some(("edit", command_matches)) => {
      let (message, _) = store.update_task(task_id(command_matches), &joined_words(command_matches))?;
      success_text(&message);
    }

    Some(("tag", command_matches)) => {
      let tag = command_matches.get_one::<String>("tag").map(|t| t.as_str());
      let task = store.set_tag(task_id(command_matches), tag)?;
      match task.tag() {
        Some(tag) => success_text(&format!("Task {} tagged: {}", task.id(), tag)),
        None => success_text(&format!("Task {} tag cleared", task.id())),
      };
    }

    Some(("show", command_matches)) => {
      let task = store.task(task_id(command_matches))?;
      Viewer::new(&store).print_task(&task);
    }

    Some(("rm", command_matches)) => {
      let id = task_id(command_matches);
      // Surface NotFound before asking anything.
      store.task(id)?;
      if !skip_confirmation && !confirm(&format!("Do you want to delete task of id {}?", id))? {
        warning_text("Task delete aborted!");
        return Ok(());
      }
      store.remove_task(id)?;
      success_text(&format!("Task {} removed!", id));
    }

    Some(("del", _)) => {
      if store.last_id().is_none() {
        warning_text("There are no tasks to delete");
        return Ok(());
      }
      if !skip_confirmation && !confirm("Do you want to delete latest task?")? {
        warning_text("Task delete aborted!");
        return Ok(());
      }
      let task = store.remove_last()?;
      success_text(&format!("Removed latest task: {}", task.description()));
    }

    Some(("flush", _)) => {
      if !skip_confirmation && !confirm("Do you want to delete all tasks?")? {
        warning_text("Flush aborted!");
        return Ok(());
      }
      store.flush()?;
      success_text("Database flushed successfully!");
    }

    Some((subcmd, _)) => {
      return Err(format!("no command found by {}", subcmd).into());
    }
  };

  Ok(())
}

fn mark_as_pending(store: &mut TaskStore, id: u64) -> CliResult {
  let task = store.mark_as_pending(id)?;
  success_text(&format!("{} {}", pending_mark(), task.description()));
  Ok(())
}

fn task_id(command_matches: &clap::ArgMatches) -> u64 {
  *command_matches.get_one::<u64>("id").expect("id is required")
}

fn joined_words(command_matches: &clap::ArgMatches) -> String {
  command_matches
    .get_many::<String>("description")
    .map(|words| words.map(|w| w.as_str()).collect::<Vec<_>>().join(" "))
    .unwrap_or_default()
}

fn is_flag_set(matches: &clap::ArgMatches, id: &str) -> bool {
  matches.get_one::<bool>(id).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::build_cli;

  #[test]
  fn cli_is_well_formed() {
    build_cli().debug_assert();
  }

  #[test]
  fn every_alias_validates_arguments_the_same_way() {
    for alias in ["done", "c", "d"] {
      build_cli()
        .try_get_matches_from(["tasker", alias])
        .expect_err("id is required");
      build_cli()
        .try_get_matches_from(["tasker", alias, "abc"])
        .expect_err("id must be a number");
      build_cli()
        .try_get_matches_from(["tasker", alias, "3"])
        .unwrap();
    }

    for alias in ["edit", "e", "m", "u"] {
      build_cli()
        .try_get_matches_from(["tasker", alias, "3"])
        .expect_err("description is required");
      let matches = build_cli()
        .try_get_matches_from(["tasker", alias, "3", "Pirates", "of", "the", "Caribbean"])
        .unwrap();
      let (_, command_matches) = matches.subcommand().unwrap();
      assert_eq!(super::joined_words(command_matches), "Pirates of the Caribbean");
    }
  }

  #[test]
  fn pending_lists_without_id_and_marks_with_id() {
    let matches = build_cli().try_get_matches_from(["tasker", "p"]).unwrap();
    let (name, command_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "pending");
    assert!(command_matches.get_one::<u64>("id").is_none());

    let matches = build_cli().try_get_matches_from(["tasker", "p", "4"]).unwrap();
    let (_, command_matches) = matches.subcommand().unwrap();
    assert_eq!(command_matches.get_one::<u64>("id"), Some(&4));
  }

  #[test]
  fn add_collects_words_and_tag() {
    let matches = build_cli()
      .try_get_matches_from(["tasker", "a", "Watch", "Games", "of", "thrones", "--tag", "tv"])
      .unwrap();
    let (name, command_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "add");
    assert_eq!(super::joined_words(command_matches), "Watch Games of thrones");
    assert_eq!(command_matches.get_one::<String>("tag").map(|t| t.as_str()), Some("tv"));
  }

  #[test]
  fn yes_flag_is_global() {
    let matches = build_cli().try_get_matches_from(["tasker", "flush", "-y"]).unwrap();
    let (_, command_matches) = matches.subcommand().unwrap();
    assert!(super::is_flag_set(command_matches, "yes"));
  }
}
