use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::extract::normalize::DocumentLines;
use crate::extract::patterns::Patterns;
use crate::logging::LogConfig;
use crate::plan::DailyPlan;
use crate::session::Session;
use crate::source::DocumentSource;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::warn;

mod airport;
mod capacity;
mod config;
mod error;
mod extract;
mod logging;
mod notam;
mod plan;
mod report;
mod sector;
mod session;
mod source;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the JSON planner configuration
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    config: PathBuf,
    /// Planning document (path or http(s) URL), overrides the configured source
    #[arg(short, long, value_name = "PATH|URL")]
    source: Option<String>,
    /// Username shown on the report
    #[arg(short, long)]
    user: Option<String>,
    /// Shared password; prompted for when missing
    #[arg(long)]
    password: Option<String>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

/// One logged-in user looking at one planning document.
struct Desk {
    session: Session,
    config: PlannerConfig,
    patterns: Patterns,
    source: Box<dyn DocumentSource>,
    plan: DailyPlan,
}

impl Desk {
    fn open(session: Session, config: PlannerConfig, location: &str) -> Result<Desk, PlanError> {
        let patterns = Patterns::compile(&config.patterns)?;
        let source = source::source_for(location, Duration::from_secs(config.fetch_timeout_secs));
        let plan = Self::build_plan(source.as_ref(), &config, &patterns)?;
        Ok(Desk {
            session,
            config,
            patterns,
            source,
            plan,
        })
    }

    fn build_plan(
        source: &dyn DocumentSource,
        config: &PlannerConfig,
        patterns: &Patterns,
    ) -> Result<DailyPlan, PlanError> {
        let text = source.read_text()?;
        let lines = DocumentLines::from_raw(&text);
        Ok(DailyPlan::build(&lines, config, patterns))
    }

    /// Keeps the previous plan when the new fetch fails.
    fn reload(&mut self) -> Result<(), PlanError> {
        self.plan = Self::build_plan(self.source.as_ref(), &self.config, &self.patterns)?;
        Ok(())
    }
}

fn load_config(path: &Path) -> Result<PlannerConfig, PlanError> {
    match PlannerConfig::load_from_file(path) {
        Err(PlanError::ConfigRead { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "config not found, using defaults");
            Ok(PlannerConfig::default())
        }
        result => result,
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn show(content: String, rows: usize) {
    if rows > 20 {
        paginate(content);
    } else {
        println!("{}", content);
    }
}

fn no_data(what: &str) {
    println!("{}", format!("No {} found in the document.", what).yellow());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging(&LogConfig::from_verbosity(args.verbose));

    let config = load_config(&args.config)?;
    let location = args.source.clone().unwrap_or_else(|| config.source.clone());

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "airspace", "airports", "notams", "traffic", "demand", "capacity", "util", "windows",
            "weather", "report", "export", "reload", "help", "exit",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    };

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    let username = match &args.user {
        Some(user) => user.clone(),
        None => rl.readline("Username (any): ")?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => rl.readline("Password: ")?,
    };
    let session = match Session::login(&username, &password, &config.shared_secret) {
        Ok(session) => session,
        Err(e) => {
            println!("{}", "Enter the correct password to access the system.".red());
            return Err(e.into());
        }
    };
    println!("{}", format!("Welcome {} ✅", session.username()).green());

    println!("Fetching the latest planning document from {}", location);
    let mut desk = Desk::open(session, config, &location)?;
    println!(
        "Plan loaded: {} airports ({} NIL), {} NOTAMs, {} demand periods.",
        desk.plan.airports.len(),
        desk.plan.nil_airports().count(),
        desk.plan.notam_count(),
        desk.plan.demand.len()
    );

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                let plan = &desk.plan;
                match parts[0] {
                    "airspace" => {
                        if plan.airspace.is_empty() {
                            no_data("airspace section");
                        } else {
                            println!("{}", plan.airspace.text());
                        }
                    },
                    "airports" => {
                        if plan.airports.is_empty() {
                            no_data("airport NOTAM blocks");
                        } else {
                            let rows = report::airport_lines(&plan.airports);
                            show(report::table(&rows), rows.len());
                        }
                    },
                    "notams" => {
                        let selected = match parts.get(1) {
                            Some(key) => match plan.airport(key) {
                                Some(airport) => vec![airport],
                                None => {
                                    println!("{}", format!("Airport {} is not mentioned in the document.", key).yellow());
                                    continue;
                                }
                            },
                            None => plan.airports.iter().collect(),
                        };
                        for airport in selected.iter().filter(|a| a.notices == airport::Notices::Nil) {
                            println!("{}", airport.to_string().green());
                        }
                        let rows = report::notam_lines(selected);
                        if !rows.is_empty() {
                            show(report::table(&rows), rows.len());
                            if parts.len() == 1 {
                                println!("{}", report::table(report::category_lines(plan)));
                            }
                        } else if plan.airports.is_empty() {
                            no_data("NOTAMs");
                        }
                    },
                    "traffic" => {
                        if plan.traffic.is_empty() {
                            no_data("airport traffic");
                        } else {
                            println!("{}", report::table(&plan.traffic));
                            let total: u32 = plan.traffic.iter().map(|t| t.total()).sum();
                            println!("Total airport movements: {}", total);
                        }
                    },
                    "demand" => {
                        if plan.demand.is_empty() {
                            no_data("hourly demand table");
                        } else {
                            show(report::table(&plan.demand), plan.demand.len());
                            if let Some(peak) = plan.peak_demand() {
                                println!("Peak demand {} at {}", peak.value, peak.label());
                            }
                        }
                    },
                    "capacity" => {
                        let hour = parts.get(2).and_then(|h| h.parse::<u8>().ok());
                        let rows: Vec<_> = match (parts.get(1), hour) {
                            (Some(sector), Some(hour)) => plan.capacity.get(hour, sector).into_iter().collect(),
                            (Some(sector), None) => plan.capacity.for_sector(sector).collect(),
                            (None, _) => plan.capacity.rows.iter().collect(),
                        };
                        if rows.is_empty() {
                            no_data("configured sector");
                        } else {
                            show(report::table(&rows), rows.len());
                            let split: Vec<String> = rows
                                .iter()
                                .filter(|r| r.is_split())
                                .map(|r| format!("{} {:02}h", r.sector, r.hour))
                                .collect();
                            if !split.is_empty() {
                                println!("{} {}", "Split:".yellow(), split.join(", "));
                            }
                        }
                    },
                    "util" => {
                        let rows = report::utilization_lines(plan);
                        show(report::table(&rows), rows.len());
                        if let Some(peak) = plan.capacity.peak_utilization(&plan.demand) {
                            let text = format!(
                                "Peak utilization {} at {}",
                                report::percent(peak.utilization),
                                time::Time::hour_start(peak.hour)
                            );
                            if peak.utilization.unwrap_or(0.0) > 1.0 {
                                println!("{}", text.red().bold());
                            } else {
                                println!("{}", text.green());
                            }
                        }
                        if !plan.sector_loads.is_empty() {
                            println!("{}", report::table(report::sector_load_lines(plan)));
                        }
                    },
                    "weather" => {
                        let routes: Vec<_> = match parts.get(1) {
                            Some(_) => plan.route_weather(&parts[1..].join(" ")).into_iter().collect(),
                            None => plan.weather.iter().collect(),
                        };
                        if routes.is_empty() {
                            no_data("route weather");
                        }
                        for route in routes {
                            println!("{}", route.route.bold());
                            if route.windows.is_empty() {
                                println!("No forecast windows.");
                            } else {
                                println!("{}", report::table(&route.windows));
                            }
                        }
                    },
                    "windows" => {
                        for window in &desk.config.windows {
                            let marker = if window.wraps_midnight() { " (past midnight)" } else { "" };
                            println!("{}{}", window, marker);
                        }
                    },
                    "report" => {
                        if let Some(path) = parts.get(1) {
                            let generated = Utc::now();
                            let date = match parts.get(2) {
                                Some(date) => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                                    Ok(date) => date,
                                    Err(_) => {
                                        println!("{}", format!("Invalid date {}, expected YYYY-MM-DD.", date).red());
                                        continue;
                                    }
                                },
                                None => generated.date_naive(),
                            };
                            let title = report::default_title(date);
                            let content = report::render(plan, &desk.session, &title, generated);
                            match report::write_report(Path::new(path), &content) {
                                Ok(()) => println!("Report written to {}", path),
                                Err(e) => println!("{}", e.to_string().red()),
                            }
                        } else {
                            println!("Usage: report <file> [YYYY-MM-DD]");
                        }
                    },
                    "export" => {
                        if let Some(path) = parts.get(1) {
                            match report::export_json(plan, Path::new(path)) {
                                Ok(()) => println!("Plan exported to {}", path),
                                Err(e) => println!("{}", e.to_string().red()),
                            }
                        } else {
                            println!("Usage: export <file>");
                        }
                    },
                    "reload" => {
                        match desk.reload() {
                            Ok(()) => println!("Document reloaded from {}.", desk.source.location()),
                            Err(e) => println!("{}", format!("Reload failed, keeping previous plan: {}", e).red()),
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  airspace              - Show the airspace section");
                        println!("  airports              - List airports and their NOTAM status");
                        println!("  notams [airport]      - Interpreted NOTAMs, all or for one airport (ORBI or ORBI/BGW)");
                        println!("  traffic               - Arrivals and departures per airport");
                        println!("  demand                - Hourly demand (overflights) table");
                        println!("  capacity [sector] [h] - Effective sector capacity per hour");
                        println!("  util                  - Demand against combined FIR capacity, peak per sector");
                        println!("  windows               - Configured sectorisation windows");
                        println!("  weather [route]       - Route weather windows (e.g. weather TASMI-KABAN)");
                        println!("  report <file> [date]  - Write the daily plan report (date YYYY-MM-DD, default today UTC)");
                        println!("  export <file>         - Write the extracted plan as JSON");
                        println!("  reload                - Fetch the document again and rebuild the plan");
                        println!("  help / ?              - Show this help menu");
                        println!("  exit / quit           - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
