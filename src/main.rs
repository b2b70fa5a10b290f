use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;
use transportopt::application::{InputTables, TransportService};
use transportopt::domain::Dimensions;
use transportopt::infrastructure::{
    init_tracing, load_instance, render_instance, AppConfig, Cli, Command, LogTarget,
};
use transportopt::solver::SolverFactory;
use transportopt::ui::{self, AppState};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(backend) = cli.solver {
        config.solver.backend = backend;
    }

    match cli.command.unwrap_or(Command::Tui { input: None }) {
        Command::Tui { input } => {
            init_tracing(&config.logging.level, LogTarget::File(&config.logging.file))
                .map_err(|e| anyhow!(e))?;
            let service = build_service(&config)?;
            let mut state = AppState::new(
                service,
                config.defaults.factories,
                config.defaults.warehouses,
                config.export.path.clone(),
            );
            if let Some(path) = input {
                let problem = load_instance(&path)?;
                state.load_tables(InputTables::from_problem(&problem));
            }
            ui::run(state).context("terminal UI failed")?;
        }

        Command::Solve {
            input,
            export,
            layout,
        } => {
            init_tracing(&config.logging.level, LogTarget::Stderr).map_err(|e| anyhow!(e))?;
            if let Some(layout) = layout {
                config.export.layout = layout;
            }
            let service = build_service(&config)?;

            let problem = load_instance(&input)?;
            let outcome = service
                .solve_problem(problem)
                .with_context(|| format!("solving {}", input.display()))?;
            print!("{}", outcome.table);

            if let Some(path) = export {
                service.export(&outcome.table, &path)?;
                info!(path = %path.display(), "Result exported");
            }
        }

        Command::Template {
            factories,
            warehouses,
        } => {
            init_tracing(&config.logging.level, LogTarget::Stderr).map_err(|e| anyhow!(e))?;
            let dims = Dimensions::new(factories, warehouses)?;
            let problem = InputTables::create(dims).parse()?;
            print!("{}", render_instance(&problem)?);
        }
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> anyhow::Result<TransportService> {
    let solver = SolverFactory::create_from_backend(config.solver.backend)
        .with_context(|| format!("creating solver backend {}", config.solver.backend))?;
    info!(solver = solver.name(), "Solver ready");

    Ok(TransportService::new(solver)
        .with_balance_tolerance(config.solver.balance_tolerance)
        .with_exporter(config.exporter()))
}
