pub mod settings;

pub use settings::{
    AppSettings, CohortSettings, ScenarioDefaults, Settings, SliderSettings, TokenSettings,
    WalletApiSettings,
};
