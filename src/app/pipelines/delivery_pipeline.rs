use crate::core::filter::{filter_orders, DeliveryWindow};
use crate::core::parser::parse_orders;
use crate::core::writer::write_orders;
use crate::core::{ConfigProvider, Extracted, FilterCriteria, Order, OrderStore, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::logger::ActivityLog;

/// Load → filter → save over one input file.
pub struct DeliveryPipeline<S: Storage + Clone, C: ConfigProvider> {
    storage: S,
    config: C,
    criteria: FilterCriteria,
    journal: ActivityLog<S>,
}

impl<S: Storage + Clone, C: ConfigProvider> DeliveryPipeline<S, C> {
    pub fn new(storage: S, config: C, criteria: FilterCriteria) -> Self {
        let journal = ActivityLog::new(
            storage.clone(),
            config.log_path(),
            config.timestamp_format().clone(),
        );
        Self {
            storage,
            config,
            criteria,
            journal,
        }
    }

    pub fn journal(&self) -> &ActivityLog<S> {
        &self.journal
    }

    pub fn window(&self) -> DeliveryWindow {
        DeliveryWindow::starting_at(self.criteria.start, self.config.window_minutes())
    }
}

impl<S: Storage + Clone, C: ConfigProvider> Pipeline for DeliveryPipeline<S, C> {
    fn extract(&self) -> Result<Extracted> {
        let path = self.config.input_path();
        tracing::info!("Loading orders from {}", path);

        let bytes = self.storage.read_file(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let parsed = parse_orders(&content, self.config.timestamp_format());

        for rejection in &parsed.rejections {
            tracing::warn!("Skipping line {}: {}", rejection.line_number, rejection.error);
            self.journal.log(rejection.to_string());
        }

        self.journal.log(format!(
            "loaded {} orders from {} ({} rejected)",
            parsed.store.len(),
            path,
            parsed.rejections.len()
        ));

        Ok(Extracted {
            rejected: parsed.rejections.len(),
            store: parsed.store,
        })
    }

    fn transform(&self, orders: &OrderStore) -> Vec<Order> {
        let window = self.window();
        let matched = filter_orders(orders, &self.criteria.district, &window);

        let format = self.config.timestamp_format();
        self.journal.log(format!(
            "district {}, window {} .. {}: {} of {} orders match",
            self.criteria.district,
            format.format(&window.start),
            format.format(&window.end),
            matched.len(),
            orders.len()
        ));

        matched
    }

    fn load(&self, orders: &[Order]) -> Result<usize> {
        let path = self.config.output_path();
        tracing::info!("Saving {} orders to {}", orders.len(), path);
        write_orders(
            &self.storage,
            path,
            orders,
            self.config.timestamp_format(),
            &self.journal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use crate::core::testing::MemoryStorage;
    use crate::core::TimestampFormat;

    const INPUT: &str = "A1,5.5,district1,2024-01-01 10:00:00\n\
                         A2,bad,district1,2024-01-01 10:00:00\n\
                         A3,2,District1,2024-01-01 10:15:00\n\
                         A4,1,district2,2024-01-01 10:05:00\n\
                         A5,3,district1,2024-01-01 10:15:01\n";

    fn criteria(start: &str) -> FilterCriteria {
        FilterCriteria {
            district: "district1".to_string(),
            start: TimestampFormat::default().parse_exact(start).unwrap(),
        }
    }

    #[test]
    fn test_extract_logs_each_rejection() {
        let storage = MemoryStorage::new();
        storage.insert("inputFile.txt", INPUT.as_bytes());
        let pipeline = DeliveryPipeline::new(
            storage.clone(),
            TomlConfig::default(),
            criteria("2024-01-01 09:45:00"),
        );

        let extracted = pipeline.extract().unwrap();

        assert_eq!(extracted.store.len(), 4);
        assert_eq!(extracted.rejected, 1);
        assert!(extracted.store.iter().all(|o| o.id != "A2"));

        let log = storage.lines("loggs.txt");
        assert!(log[0].contains("weight has invalid format: 'bad'"));
        assert!(log[1].ends_with("loaded 4 orders from inputFile.txt (1 rejected)"));
    }

    #[test]
    fn test_extract_missing_input_is_error() {
        let pipeline = DeliveryPipeline::new(
            MemoryStorage::new(),
            TomlConfig::default(),
            criteria("2024-01-01 09:45:00"),
        );

        assert!(pipeline.extract().is_err());
    }

    #[test]
    fn test_transform_uses_window_and_district() {
        let storage = MemoryStorage::new();
        storage.insert("inputFile.txt", INPUT.as_bytes());
        let pipeline = DeliveryPipeline::new(
            storage.clone(),
            TomlConfig::default(),
            criteria("2024-01-01 09:45:00"),
        );

        let extracted = pipeline.extract().unwrap();
        let matched = pipeline.transform(&extracted.store);

        let ids: Vec<&str> = matched.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A3"]);
        assert!(storage
            .lines("loggs.txt")
            .last()
            .unwrap()
            .ends_with("district district1, window 2024-01-01 09:45:00 .. 2024-01-01 10:15:00: 2 of 4 orders match"));
    }

    #[test]
    fn test_window_length_comes_from_config() {
        let mut config = TomlConfig::default();
        config.filter.window_minutes = 45;
        let pipeline = DeliveryPipeline::new(
            MemoryStorage::new(),
            config,
            criteria("2024-01-01 09:45:00"),
        );

        assert_eq!(
            pipeline.window().end,
            TimestampFormat::default()
                .parse_exact("2024-01-01 10:30:00")
                .unwrap()
        );
    }

    #[test]
    fn test_load_writes_output_file() {
        let storage = MemoryStorage::new();
        let pipeline = DeliveryPipeline::new(
            storage.clone(),
            TomlConfig::default(),
            criteria("2024-01-01 09:45:00"),
        );
        let order = crate::core::parser::parse_line(
            "A1,5.5,district1,2024-01-01 10:00:00",
            &TimestampFormat::default(),
        )
        .unwrap();

        assert_eq!(pipeline.load(&[order]).unwrap(), 1);
        assert_eq!(
            storage.contents("outputFile.txt").unwrap(),
            "A1,5.5,district1,2024-01-01 10:00:00\n"
        );
    }
}
