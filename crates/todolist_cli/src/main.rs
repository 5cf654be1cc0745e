//! Todolist console front end.
//!
//! # Responsibility
//! - Map subcommands onto the core container operations.
//! - Restore the session and todo list at startup, run one operation to
//!   completion, and surface container notifications on stderr.
//!
//! # Invariants
//! - Each invocation is one event: no operation suspends mid-mutation.
//! - Exit code is non-zero whenever the requested operation failed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todolist_core::{
    default_log_level, init_logging, AuthContainer, Severity, SqliteStore, SystemClock,
    TodoContainer, TodoPatch, UiContainer, User,
};
use uuid::Uuid;

/// Personal todo list over a local store. Login is mocked: any credentials
/// start a session.
#[derive(Parser, Debug)]
#[command(name = "todolist", version, about, long_about = None)]
struct Cli {
    /// Path to the local store file.
    #[arg(long, default_value = "todolist.db", global = true)]
    db: PathBuf,

    /// Directory for rolling log files; logging is off when absent.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register and start a session (credentials are not verified).
    Signup {
        email: String,
        /// Accepted and ignored, like the rest of the mocked auth flow.
        #[arg(short, long, default_value = "")]
        password: String,
        /// Display name; defaults to the email local part.
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Start a session with any credentials.
    Login {
        email: String,
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Show the current session and view state.
    Status,
    /// Add a todo.
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List todos in insertion order.
    List,
    /// Update a todo's fields.
    Update {
        id: Uuid,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip a todo's completion state.
    Toggle { id: Uuid },
    /// Delete a todo.
    Delete { id: Uuid },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
            eprintln!("warning: {err}");
        }
    }

    log::debug!(
        "event=cli_start module=cli db={} command={:?}",
        cli.db.display(),
        cli.command
    );

    let store = match SqliteStore::open(&cli.db) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open store at {}: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    let mut auth = AuthContainer::new(&store);
    let mut todos = TodoContainer::new(&store, SystemClock);
    let mut ui = UiContainer::new(SystemClock);

    // Restore a prior session before dispatching; a corrupt record is
    // reported but still leaves the commands usable.
    if auth.check_status().is_err() {
        ui.add_notification(
            auth.error().unwrap_or("failed to restore session").to_string(),
            Severity::Error,
        );
    }
    let user = auth.current_user().cloned();
    if todos.fetch_todos(user.as_ref()).is_err() {
        ui.add_notification(
            todos.error().unwrap_or("failed to load todos").to_string(),
            Severity::Error,
        );
    }

    let ok = dispatch(cli.command, &mut auth, &mut todos, &mut ui, user);

    for toast in ui.notifications() {
        match toast.severity {
            Severity::Error | Severity::Warning => eprintln!("{}", toast.message),
            Severity::Success | Severity::Info => println!("{}", toast.message),
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn dispatch(
    command: Commands,
    auth: &mut AuthContainer<'_, SqliteStore>,
    todos: &mut TodoContainer<'_, SqliteStore, SystemClock>,
    ui: &mut UiContainer<SystemClock>,
    user: Option<User>,
) -> bool {
    match command {
        Commands::Signup {
            email,
            password,
            name,
        } => match auth.signup(ui, &email, &password, name.as_deref()) {
            Ok(()) => {
                let user = auth.current_user().expect("session after signup");
                ui.add_notification(format!("signed up as {}", user.email), Severity::Success);
                true
            }
            Err(err) => {
                ui.add_notification(err.to_string(), Severity::Error);
                false
            }
        },
        Commands::Login { email, password } => match auth.login(ui, &email, &password) {
            Ok(()) => {
                let user = auth.current_user().expect("session after login");
                ui.add_notification(format!("logged in as {}", user.email), Severity::Success);
                true
            }
            Err(err) => {
                ui.add_notification(err.to_string(), Severity::Error);
                false
            }
        },
        Commands::Logout => match auth.logout(ui) {
            Ok(()) => {
                ui.add_notification("logged out", Severity::Success);
                true
            }
            Err(err) => {
                ui.add_notification(err.to_string(), Severity::Error);
                false
            }
        },
        Commands::Status => {
            match &user {
                Some(user) => {
                    println!(
                        "logged in as {} ({})",
                        user.email,
                        user.name.as_deref().unwrap_or("-")
                    );
                    println!("todos: {}", todos.todos().len());
                }
                None => println!("not logged in"),
            }
            println!("view: {:?}", ui.current_view());
            true
        }
        Commands::Add { title, description } => {
            match todos.create_todo(user.as_ref(), &title, description.as_deref()) {
                Ok(todo) => {
                    println!("added {}", render(&todo));
                    true
                }
                Err(err) => {
                    ui.add_notification(err.to_string(), Severity::Error);
                    false
                }
            }
        }
        Commands::List => {
            if todos.todos().is_empty() {
                println!("No todos found.");
            } else {
                println!("Total todos: {}", todos.todos().len());
                for todo in todos.todos() {
                    println!("{}", render(todo));
                }
            }
            true
        }
        Commands::Update {
            id,
            title,
            description,
            completed,
        } => {
            let patch = TodoPatch {
                title,
                description,
                completed,
            };
            match todos.update_todo(user.as_ref(), id, &patch) {
                Ok(()) => {
                    println!("updated {id}");
                    true
                }
                Err(err) => {
                    ui.add_notification(err.to_string(), Severity::Error);
                    false
                }
            }
        }
        Commands::Toggle { id } => match todos.toggle_todo(user.as_ref(), id) {
            Ok(()) => {
                println!("toggled {id}");
                true
            }
            Err(err) => {
                ui.add_notification(err.to_string(), Severity::Error);
                false
            }
        },
        Commands::Delete { id } => match todos.delete_todo(user.as_ref(), id) {
            Ok(()) => {
                println!("deleted {id}");
                true
            }
            Err(err) => {
                ui.add_notification(err.to_string(), Severity::Error);
                false
            }
        },
    }
}

fn render(todo: &todolist_core::Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    match &todo.description {
        Some(description) => format!("[{mark}] {} - {description} ({})", todo.title, todo.id),
        None => format!("[{mark}] {} ({})", todo.title, todo.id),
    }
}
