//! Configuration for labstats.
//!
//! Settings live in `.labstats.toml`, discovered by walking up from the
//! working directory or passed explicitly. Every key is optional; missing
//! keys take the defaults in [`thresholds`].

pub mod core;
pub mod loader;
pub mod thresholds;

pub use self::core::{
    DoctorsConfig, ExamsConfig, LabstatsConfig, OutputConfig, PatientsConfig, ServicesConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};

/// Commented default config written by `labstats init`.
pub const DEFAULT_CONFIG: &str = r#"# labstats configuration

# Decimal places (0-4) shared by every report unless overridden.
[precision]
percentage = 1
ratio = 2

[services]
premium_price = 150.0
top_limit = 10
pad_top = true

[services.demand_tiers]
default_label = "Sin Actividad"
tiers = [
    { threshold = 30, label = "Alta Demanda" },
    { threshold = 10, label = "Demanda Media" },
    { threshold = 1, label = "Baja Demanda" },
]

[services.grouping]
notable_threshold = 15
notable_cap = 5
order = "by_count"

[exams]
top_limit = 10
pad_top = true

[exams.frequency_tiers]
default_label = "Sin Solicitudes"
tiers = [
    { threshold = 50, label = "Muy Frecuente" },
    { threshold = 20, label = "Frecuente" },
    { threshold = 5, label = "Ocasional" },
    { threshold = 1, label = "Poco Frecuente" },
]

[doctors]
top_limit = 10
pad_top = false

[doctors.activity_tiers]
default_label = "Inactivo"
tiers = [
    { threshold = 50, label = "Muy Activo" },
    { threshold = 20, label = "Activo" },
    { threshold = 1, label = "Poco Activo" },
]

# Exams per request
[doctors.efficiency_tiers]
default_label = "Baja Eficiencia"
tiers = [
    { threshold = 3.0, label = "Alta Eficiencia" },
    { threshold = 1.5, label = "Eficiencia Media" },
]

[patients]
top_limit = 10
pad_top = false

[patients.frequency_tiers]
default_label = "Sin Solicitudes"
tiers = [
    { threshold = 10, label = "Paciente Frecuente" },
    { threshold = 3, label = "Paciente Regular" },
    { threshold = 1, label = "Paciente Ocasional" },
]

[output]
default_format = "terminal"
"#;
