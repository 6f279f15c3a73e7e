pub trait SummaryNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String>;
}
