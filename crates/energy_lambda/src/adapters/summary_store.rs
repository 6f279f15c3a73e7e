use energy_core::item::SummaryItem;

pub trait SummaryStore {
    fn put_summary(&self, table_name: &str, item: &SummaryItem) -> Result<(), String>;
}
