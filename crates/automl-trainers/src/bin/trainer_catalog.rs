use automl_trainers::{CatalogConfig, TrainerContext, TrainerExtensionCatalog};
use automl_types::TaskKind;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let max_iterations: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 100,
    };

    let config = CatalogConfig::from_env()?;
    let catalog = TrainerExtensionCatalog::build(config)?;
    let context = TrainerContext::new();

    let mut report = serde_json::Map::new();
    for task in TaskKind::all() {
        let mut trainers = Vec::new();
        for trainer in catalog.get_trainers(task, max_iterations) {
            let extension = catalog.get_trainer_extension(trainer)?;
            let instance = extension.create_instance(&context, None)?;
            let defaults = instance.parameter_set()?;
            trainers.push(serde_json::json!({
                "trainer": trainer,
                "sweep_parameters": extension.hyperparam_sweep_ranges().len(),
                "defaults": defaults.to_string(),
            }));
        }
        report.insert(task.to_string(), serde_json::Value::Array(trainers));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
