//! Command-line front end. Each subcommand plays the part of one view.

use clap::{Parser, Subcommand};

use calorie_client::dashboard::DashboardSummary;
use calorie_client::format::{format_date, format_date_time, format_number, truncate, DEFAULT_TRUNCATE};
use calorie_client::navigation::{self, redirect_if_authenticated, require_auth};
use calorie_client::notify::Level;
use calorie_client::validation::FieldErrors;
use calorie_client::{ApiError, AppState, SubmitOutcome, View};
use calorie_common::{LoginRequest, LookupResult, MealRequest, RegisterRequest};

#[derive(Parser)]
#[command(name = "calorie", version)]
#[command(about = "Look up calories for a dish and keep a short history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Look up calories for a dish
    Lookup {
        /// Dish name, e.g. "chicken biryani"
        #[arg(required = true, num_args = 1..)]
        dish: Vec<String>,
        #[arg(short, long, default_value_t = 1.0)]
        servings: f64,
    },
    /// List recent lookups
    History {
        /// Forget all recorded lookups
        #[arg(long)]
        clear: bool,
    },
    /// Summary of your tracking
    Dashboard,
}

/// Run one command against the app. Returns whether it succeeded.
pub async fn run(app: &AppState, command: Command) -> bool {
    match command {
        Command::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            app.router.navigate(View::Register);
            if already_signed_in(app) {
                return true;
            }
            let outcome = app
                .auth_form
                .submit_register(RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                })
                .await;
            report_auth(outcome)
        }

        Command::Login { email, password } => {
            app.router.navigate(View::Login);
            if already_signed_in(app) {
                return true;
            }
            let outcome = app
                .auth_form
                .submit_login(LoginRequest { email, password })
                .await;
            report_auth(outcome)
        }

        Command::Logout => {
            navigation::logout(&app.router, &mut app.session.borrow_mut());
            println!("Signed out.");
            true
        }

        Command::Whoami => {
            let session = app.session.borrow();
            match session.user() {
                Some(user) if session.is_authenticated() => {
                    println!("{} <{}>", user.full_name(), user.email);
                    true
                }
                _ => {
                    println!("Not signed in.");
                    false
                }
            }
        }

        Command::Lookup { dish, servings } => {
            if !enter(app, View::Calories) {
                eprintln!("Please sign in first: calorie login --email <email> --password <password>");
                return false;
            }

            let request = MealRequest {
                dish_name: dish.join(" "),
                servings,
            };
            match app.lookup_form.submit(request).await {
                SubmitOutcome::Completed(result) => {
                    print_result(&result);
                    true
                }
                SubmitOutcome::Invalid(errors) => {
                    print_field_errors(&errors);
                    false
                }
                SubmitOutcome::Failed(ApiError::AuthorizationExpired(_)) => {
                    eprintln!("Redirected to {}.", app.router.current());
                    false
                }
                SubmitOutcome::Failed(_) | SubmitOutcome::Busy => false,
            }
        }

        Command::History { clear } => {
            if !enter(app, View::Dashboard) {
                eprintln!("Please sign in to see your history.");
                return false;
            }

            let mut history = app.history.borrow_mut();
            if clear {
                history.clear_history();
                println!("History cleared.");
                return true;
            }
            if history.is_empty() {
                println!("No lookups yet. Try: calorie lookup apple --servings 2");
                return true;
            }
            for entry in history.entries() {
                println!(
                    "{:<16} {:<32} {:>6} x  {:>8} cal",
                    format_date_time(&entry.timestamp),
                    truncate(&entry.dish_name, 30),
                    format_number(entry.servings),
                    format_number(entry.total_calories),
                );
            }
            true
        }

        Command::Dashboard => {
            app.router.navigate(View::Dashboard);
            let summary = DashboardSummary::build(
                &app.router,
                &app.session.borrow(),
                &app.history.borrow(),
            );
            let Some(summary) = summary else {
                eprintln!("Please sign in to see your dashboard.");
                return false;
            };

            println!("{}", summary.greeting());
            println!();
            println!("Total searches: {}", summary.total_lookups);
            println!("Avg calories:   {}", format_number(summary.average_calories as f64));
            if let Some(latest) = summary.latest_calories {
                println!("Latest:         {} cal", format_number(latest));
            }
            if !summary.recent.is_empty() {
                println!();
                println!("Recent searches:");
                for entry in &summary.recent {
                    println!(
                        "  {:<40} {:>12}  {} cal",
                        truncate(&entry.dish_name, 38),
                        format_date(&entry.timestamp),
                        format_number(entry.total_calories),
                    );
                }
                if summary.more > 0 {
                    println!("  +{} more searches", summary.more);
                }
            }
            true
        }
    }
}

/// Show `view`, running the sign-in guard when the view is protected.
fn enter(app: &AppState, view: View) -> bool {
    app.router.navigate(view);
    !view.requires_auth() || require_auth(&app.router, &app.session.borrow())
}

fn already_signed_in(app: &AppState) -> bool {
    let session = app.session.borrow();
    if redirect_if_authenticated(&app.router, &session) {
        if let Some(user) = session.user() {
            println!("Already signed in as {}.", user.email);
        }
        return true;
    }
    false
}

fn report_auth<T>(outcome: SubmitOutcome<T>) -> bool {
    match outcome {
        SubmitOutcome::Completed(_) => true,
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            false
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::Busy => false,
    }
}

fn print_result(result: &LookupResult) {
    println!("{}", truncate(&result.dish_name, DEFAULT_TRUNCATE));
    println!("  Servings:             {}", format_number(result.servings));
    println!("  Calories per serving: {}", format_number(result.calories_per_serving));
    println!("  Total calories:       {}", format_number(result.total_calories));
    if !result.source.is_empty() {
        println!("  Source:               {}", result.source);
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
}

/// Show queued notifications; errors go to stderr.
pub fn print_notifications(app: &AppState) {
    for note in app.notifications.drain() {
        match note.level {
            Level::Success => println!("{}", note.message),
            Level::Error => eprintln!("error: {}", note.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_joins_dish_words() {
        let cli = Cli::try_parse_from(["calorie", "lookup", "chicken", "biryani", "-s", "2.5"]).unwrap();
        match cli.command {
            Command::Lookup { dish, servings } => {
                assert_eq!(dish.join(" "), "chicken biryani");
                assert_eq!(servings, 2.5);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_lookup_defaults_to_one_serving() {
        let cli = Cli::try_parse_from(["calorie", "lookup", "apple"]).unwrap();
        assert!(matches!(cli.command, Command::Lookup { servings, .. } if servings == 1.0));
    }

    #[test]
    fn test_register_requires_all_fields() {
        assert!(Cli::try_parse_from(["calorie", "register", "--email", "a@b.co"]).is_err());
    }
}
