use std::{path::PathBuf, process::exit};

use clap::{Parser, ValueEnum};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use retail_dashboard::{
    DashboardConfig, DashboardData, DashboardReport, Error, Period, build_dashboard_charts,
    build_dashboard_report, format_currency, format_percentage, load_expenses, load_products,
    load_sales, resolve_local_offset,
};

/// Builds the retail dashboard from sales and expenses exported by the backend.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the sales, as a JSON array or CSV file.
    #[arg(long)]
    sales: PathBuf,

    /// File path to the expenses, as a JSON array or CSV file.
    #[arg(long)]
    expenses: PathBuf,

    /// File path to the product catalogue, used for the best-sellers ranking.
    #[arg(long)]
    products: Option<PathBuf>,

    /// The period to aggregate over.
    #[arg(short, long, value_enum, default_value_t = Period::Monthly)]
    period: Period,

    /// The current time as an RFC 3339 date-time. Defaults to the system clock.
    #[arg(long)]
    now: Option<String>,

    /// File path to a JSON file with dashboard settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canonical timezone name (e.g., "America/Sao_Paulo"), overrides the config file.
    #[arg(long)]
    timezone: Option<String>,

    /// The sales goal, overrides the config file.
    #[arg(long)]
    goal: Option<f64>,

    /// What to print.
    #[arg(short, long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// A human readable summary.
    Text,
    /// The full report as JSON.
    Json,
    /// The ECharts options of the sales and expenses charts as JSON.
    Charts,
}

fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(error) = run(args) {
        tracing::error!("{error}");
        eprintln!("Error: {error}");
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
    }

    if let Some(goal) = args.goal {
        config.sales_goal = goal;
    }

    let now = match &args.now {
        Some(text) => OffsetDateTime::parse(text, &Rfc3339)
            .map_err(|error| Error::InvalidDateTime(text.clone(), error.to_string()))?,
        None => OffsetDateTime::now_utc(),
    };

    let local_offset = resolve_local_offset(&config.timezone, now)?;
    tracing::debug!("Using UTC offset {local_offset} for timezone {}", config.timezone);

    let data = DashboardData {
        sales: load_sales(&args.sales)?,
        expenses: load_expenses(&args.expenses)?,
        products: match &args.products {
            Some(path) => load_products(path)?,
            None => Vec::new(),
        },
    };

    let report = build_dashboard_report(&data, args.period, now, &config, local_offset);

    match args.output {
        Output::Text => print_summary(&report),
        Output::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Output::Charts => {
            let charts =
                build_dashboard_charts(&report.sales_chart, &report.expenses_chart, report.period);
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }
    }

    Ok(())
}

fn print_summary(report: &DashboardReport) {
    let title = report.period.chart_title();

    println!("Dashboard de Performance ({})", report.period.label());
    println!();
    println!("Receita Total:   {}", format_currency(report.totals.revenue));
    println!("Despesas Totais: {}", format_currency(report.totals.expenses));
    println!("Lucro Líquido:   {}", format_currency(report.totals.net_profit));

    match report.goal_progress {
        Some(progress) => println!(
            "Meta: {} ({} da meta atingida)",
            format_currency(report.sales_goal),
            format_percentage(progress)
        ),
        None => println!("Defina uma meta para acompanhar o progresso."),
    }

    println!();
    println!("Vendas ({title}):");
    if report.sales_chart.is_empty() {
        println!("  Sem dados de vendas para o período selecionado.");
    }
    for point in &report.sales_chart {
        println!("  {:<12} {}", point.label, format_currency(point.value));
    }

    println!();
    println!("Despesas ({title}):");
    if report.expenses_chart.is_empty() {
        println!("  Sem dados de despesas para o período selecionado.");
    }
    for point in &report.expenses_chart {
        println!("  {:<12} {}", point.label, format_currency(point.value));
    }

    if !report.top_products.is_empty() {
        println!();
        println!("Produtos Mais Vendidos:");
        for product in &report.top_products {
            println!(
                "  {} ({} un.) {}",
                product.name,
                product.quantity,
                format_currency(product.revenue)
            );
        }
    }

    if !report.expense_breakdown.is_empty() {
        println!();
        println!("Despesas por Categoria:");
        for category in &report.expense_breakdown {
            println!(
                "  {:<20} {}",
                category.category,
                format_currency(category.total)
            );
        }
    }
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}
