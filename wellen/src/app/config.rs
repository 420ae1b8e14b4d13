use app_core::string_error::ErrorStringExt;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct Config {
    /// Distance between consecutive generated x-values.
    pub x_step: f64,
    /// Number of points produced by one burst.
    pub burst_len: usize,
    /// Pause between two live feed points.
    pub live_interval_ms: u64,
    pub sine_amplitude: f64,
    pub sine_frequency: f64,
    pub sine_offset: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x_step: 0.1,
            burst_len: 100,
            live_interval_ms: 100,
            sine_amplitude: 4.0,
            sine_frequency: 1.0,
            sine_offset: 5.0,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        let mut config = Self::default();
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(".wellen");
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        config.update_from_str(&config_raw);
        Ok(config)
    }

    fn update_from_str(&mut self, raw: &str) {
        for line in raw.lines() {
            // Lines starting with "#" are considered comments.
            if line.starts_with('#') {
                continue;
            }
            let mut iter = line.split('=');
            let key = iter.next();
            let val = iter.next();
            match (key, val) {
                (Some("x_step"), Some(raw)) => parse_into("x_step", raw, &mut self.x_step),
                (Some("burst_len"), Some(raw)) => parse_into("burst_len", raw, &mut self.burst_len),
                (Some("live_interval_ms"), Some(raw)) => {
                    parse_into("live_interval_ms", raw, &mut self.live_interval_ms)
                }
                (Some("sine_amplitude"), Some(raw)) => {
                    parse_into("sine_amplitude", raw, &mut self.sine_amplitude)
                }
                (Some("sine_frequency"), Some(raw)) => {
                    parse_into("sine_frequency", raw, &mut self.sine_frequency)
                }
                (Some("sine_offset"), Some(raw)) => {
                    parse_into("sine_offset", raw, &mut self.sine_offset)
                }
                _ => continue,
            }
        }
    }
}

fn parse_into<T: std::str::FromStr>(key: &str, raw: &str, slot: &mut T) {
    if let Ok(val) = raw.trim().parse::<T>() {
        *slot = val;
    } else {
        log::warn!("could not parse config value '{}' for key '{}'", raw, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_str() {
        let mut config = Config::default();
        config.update_from_str(
            "# a comment\n\
             x_step=0.5\n\
             burst_len=25\n\
             unknown_key=whatever\n\
             sine_amplitude=oops\n\
             sine_offset=0.0",
        );
        assert_eq!(config.x_step, 0.5);
        assert_eq!(config.burst_len, 25);
        // malformed value keeps the default
        assert_eq!(config.sine_amplitude, Config::default().sine_amplitude);
        assert_eq!(config.sine_offset, 0.0);
    }

    #[test]
    fn test_empty_input_keeps_defaults() {
        let mut config = Config::default();
        config.update_from_str("");
        assert_eq!(config.burst_len, Config::default().burst_len);
    }
}
