const CSV_SUFFIX: &str = ".csv";
const JSON_SUFFIX: &str = ".json";

fn has_suffix_ignore_case(key: &str, suffix: &str) -> bool {
    key.len() >= suffix.len()
        && key
            .get(key.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

pub fn is_csv_key(key: &str) -> bool {
    has_suffix_ignore_case(key, CSV_SUFFIX)
}

pub fn is_json_key(key: &str) -> bool {
    has_suffix_ignore_case(key, JSON_SUFFIX)
}

/// Key of the JSON object written for a CSV upload: the `.csv` suffix
/// becomes `.json`, everything before it is kept.
pub fn json_object_key(csv_key: &str) -> String {
    if is_csv_key(csv_key) {
        format!("{}{JSON_SUFFIX}", &csv_key[..csv_key.len() - CSV_SUFFIX.len()])
    } else {
        format!("{csv_key}{JSON_SUFFIX}")
    }
}
