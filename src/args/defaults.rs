/// Config filenames looked up in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["ratechart.toml", "ratechart.json"];

pub(crate) fn default_charts_path() -> String {
    "charts".to_owned()
}
