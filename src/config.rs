//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_DEMO_NUMBER: i64 = 7;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log: LogConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Filtro de logging (sintaxis `EnvFilter`), p.ej. `info,linearly_core=debug`.
    pub filter: String,
}

/// Parámetros del binario `linearly-demo`.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Número inicial cuando no se pasa `--number`.
    pub number: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración desde una función de búsqueda arbitraria.
    /// Valores ausentes o no parseables caen al default.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let filter = lookup("LINEARLY_LOG").filter(|v| !v.trim().is_empty())
                                           .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let number = lookup("LINEARLY_DEMO_NUMBER").and_then(|v| v.trim().parse().ok())
                                                   .unwrap_or(DEFAULT_DEMO_NUMBER);
        Self { log: LogConfig { filter },
               demo: DemoConfig { number } }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.log.filter, "info");
        assert_eq!(cfg.demo.number, 7);
    }

    #[test]
    fn reads_values() {
        let cfg = AppConfig::from_lookup(lookup(&[("LINEARLY_LOG", "linearly_core=trace"),
                                                  ("LINEARLY_DEMO_NUMBER", " 41 ")]));
        assert_eq!(cfg.log.filter, "linearly_core=trace");
        assert_eq!(cfg.demo.number, 41);
    }

    #[test]
    fn unparseable_number_falls_back() {
        let cfg = AppConfig::from_lookup(lookup(&[("LINEARLY_DEMO_NUMBER", "seven"), ("LINEARLY_LOG", "  ")]));
        assert_eq!(cfg.demo.number, 7);
        assert_eq!(cfg.log.filter, "info");
    }
}
