//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// Departments charted by default, in publication order.
pub const DEFAULT_REGIONS: [&str; 25] = [
    "CUSCO",
    "LA LIBERTAD",
    "LIMA",
    "ICA",
    "ANCASH",
    "JUNIN",
    "AMAZONAS",
    "LORETO",
    "PUNO",
    "MADRE DE DIOS",
    "SAN MARTIN",
    "TACNA",
    "AREQUIPA",
    "UCAYALI",
    "CAJAMARCA",
    "HUANUCO",
    "HUANCAVELICA",
    "CALLAO",
    "AYACUCHO",
    "TUMBES",
    "MOQUEGUA",
    "APURIMAC",
    "PASCO",
    "PIURA",
    "LAMBAYEQUE",
];

/// Spanish month abbreviations used on the time axis.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SET", "OCT", "NOV", "DIC",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            pipeline: PipelineConfig::default(),
            regions: owned(&DEFAULT_REGIONS),
            labels: LabelsConfig::default(),
            output: OutputConfig::default(),
            styling: StylingConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fallecidos_sinadef.csv"),
            delimiter: "|".to_string(),
            date_column: "FECHA".to_string(),
            region_column: "DEPARTAMENTO DOMICILIO".to_string(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tail_trim: 3,
            window_size: 7,
            years: 3,
            lookahead_months: 2,
            current_date: None,
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            month_abbreviations: owned(&MONTH_ABBREVIATIONS),
            nationwide_name: "PERU".to_string(),
            title_prefix: "Muertes SINADEF al".to_string(),
            date_format: "%d - %m - %y".to_string(),
            caption: "Muertes SINADEF país.".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("graficos"),
            extension: "jpg".to_string(),
            width: 1500,
            height: 600,
            render: true,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            background_color: "#F5F1F5".to_string(),
            grid_color: "#DFD8DF".to_string(),
            label_color: "#606060".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12,
            title_font_size: 20,
            palette: owned(&["#1f77b4", "#ff7f0e", "#2ca02c"]),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file: None,
        }
    }
}
