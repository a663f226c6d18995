use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    self, MAX_HORIZON_YEARS, ScheduleEntry, SimulationConfig, YearResult,
};
use crate::report;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "goaltrack",
    about = "Investment goal tracker (monthly compounding over a per-year contribution schedule)"
)]
pub struct Cli {
    #[arg(long, default_value_t = 30, help = "Investment horizon in years")]
    years: u32,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Average annual return in percent, e.g. 7"
    )]
    annual_return: f64,
    #[arg(long, default_value_t = 1_500_000.0, help = "Target net worth")]
    target_net_worth: f64,
    #[arg(
        long,
        default_value_t = 500.0,
        help = "Monthly contribution in year 1"
    )]
    starting_monthly: f64,
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Amount the monthly contribution rises by each year"
    )]
    monthly_increment: f64,
    #[arg(
        long = "monthly",
        value_name = "YEAR:AMOUNT",
        value_parser = parse_year_amount,
        help = "Override the monthly contribution for one year, e.g. --monthly 5:900"
    )]
    monthly_overrides: Vec<(u32, f64)>,
    #[arg(
        long = "lump-sum",
        value_name = "YEAR:AMOUNT",
        value_parser = parse_year_amount,
        help = "One-off lump sum added at the end of a year, e.g. --lump-sum 3:10000"
    )]
    lump_sum_overrides: Vec<(u32, f64)>,
}

fn parse_year_amount(raw: &str) -> Result<(u32, f64), String> {
    let (year, amount) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected YEAR:AMOUNT, got '{raw}'"))?;
    let year = year
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid year in '{raw}'"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid amount in '{raw}'"))?;
    Ok((year, amount))
}

/// Fully resolved inputs for one projection run.
#[derive(Debug)]
pub struct ProjectionRequest {
    pub config: SimulationConfig,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    years: Option<u32>,
    annual_return: Option<f64>,
    target_net_worth: Option<f64>,
    starting_monthly: Option<f64>,
    monthly_increment: Option<f64>,
    monthlies: Option<Vec<f64>>,
    lump_sums: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    years: u32,
    /// Echoed back in percent, matching the request convention.
    annual_return: f64,
    target_net_worth: f64,
    year_results: Vec<YearResult>,
    final_portfolio_value: f64,
    progress_pct: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_request(cli: Cli) -> Result<ProjectionRequest, String> {
    if cli.years < 1 {
        return Err("--years must be >= 1".to_string());
    }

    if cli.years > MAX_HORIZON_YEARS {
        return Err(format!("--years must be <= {MAX_HORIZON_YEARS}"));
    }

    if !cli.annual_return.is_finite() || cli.annual_return <= -100.0 {
        return Err("--annual-return must be > -100".to_string());
    }

    if !cli.target_net_worth.is_finite() || cli.target_net_worth <= 0.0 {
        return Err("--target-net-worth must be > 0".to_string());
    }

    if !cli.starting_monthly.is_finite() || cli.starting_monthly < 0.0 {
        return Err("--starting-monthly must be >= 0".to_string());
    }

    if !cli.monthly_increment.is_finite() || cli.monthly_increment < 0.0 {
        return Err("--monthly-increment must be >= 0".to_string());
    }

    for &(year, amount) in &cli.monthly_overrides {
        if year < 1 || year > cli.years {
            return Err(format!(
                "--monthly year {year} is outside the {}-year horizon",
                cli.years
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("--monthly amount for year {year} must be >= 0"));
        }
    }

    for &(year, amount) in &cli.lump_sum_overrides {
        if year < 1 || year > cli.years {
            return Err(format!(
                "--lump-sum year {year} is outside the {}-year horizon",
                cli.years
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("--lump-sum amount for year {year} must be >= 0"));
        }
    }

    let schedule = core::build_schedule(
        cli.years,
        cli.starting_monthly,
        cli.monthly_increment,
        &cli.monthly_overrides,
        &cli.lump_sum_overrides,
    );

    Ok(ProjectionRequest {
        config: SimulationConfig {
            horizon_years: cli.years,
            annual_return_rate: cli.annual_return / 100.0,
            target_net_worth: cli.target_net_worth,
        },
        schedule,
    })
}

/// Runs one projection from CLI flags and prints the table, the contribution
/// bars, and the summary figures.
pub fn run_projection(cli: Cli) -> Result<(), String> {
    let request = build_request(cli)?;
    let results = core::project(&request.config, &request.schedule).map_err(|e| e.to_string())?;
    let summary = core::summarize(&request.config, &results);

    print!("{}", report::render_table(&results));
    println!();
    print!("{}", report::render_contribution_bars(&results));
    println!();
    print!("{}", report::render_summary(&summary));
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("goaltrack HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let results = match core::project(&request.config, &request.schedule) {
        Ok(results) => results,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };

    tracing::debug!(
        years = request.config.horizon_years,
        final_value = results.last().map_or(0.0, |r| r.portfolio_value),
        "projection served"
    );

    json_response(StatusCode::OK, build_project_response(&request, results))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn request_from_json(json: &str) -> Result<ProjectionRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    request_from_payload(payload)
}

fn request_from_payload(payload: ProjectPayload) -> Result<ProjectionRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.annual_return {
        cli.annual_return = v;
    }
    if let Some(v) = payload.target_net_worth {
        cli.target_net_worth = v;
    }
    if let Some(v) = payload.starting_monthly {
        cli.starting_monthly = v;
    }
    if let Some(v) = payload.monthly_increment {
        cli.monthly_increment = v;
    }

    let mut request = build_request(cli)?;

    if let Some(monthlies) = payload.monthlies {
        if monthlies.len() != request.schedule.len() {
            return Err(format!(
                "monthlies must list one amount per year ({} expected)",
                request.schedule.len()
            ));
        }
        for (entry, amount) in request.schedule.iter_mut().zip(monthlies) {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!(
                    "monthlies amount for year {} must be >= 0",
                    entry.year
                ));
            }
            entry.monthly_contribution = amount;
        }
    }

    if let Some(lump_sums) = payload.lump_sums {
        if lump_sums.len() != request.schedule.len() {
            return Err(format!(
                "lumpSums must list one amount per year ({} expected)",
                request.schedule.len()
            ));
        }
        for (entry, amount) in request.schedule.iter_mut().zip(lump_sums) {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!(
                    "lumpSums amount for year {} must be >= 0",
                    entry.year
                ));
            }
            entry.lump_sum = amount;
        }
    }

    Ok(request)
}

fn default_cli_for_api() -> Cli {
    Cli {
        years: 30,
        annual_return: 7.0,
        target_net_worth: 1_500_000.0,
        starting_monthly: 500.0,
        monthly_increment: 50.0,
        monthly_overrides: Vec::new(),
        lump_sum_overrides: Vec::new(),
    }
}

fn build_project_response(request: &ProjectionRequest, results: Vec<YearResult>) -> ProjectResponse {
    let summary = core::summarize(&request.config, &results);
    ProjectResponse {
        years: request.config.horizon_years,
        annual_return: request.config.annual_return_rate * 100.0,
        target_net_worth: request.config.target_net_worth,
        year_results: results,
        final_portfolio_value: summary.final_portfolio_value,
        progress_pct: summary.progress_pct,
    }
}
