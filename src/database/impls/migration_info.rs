use std::path::Path;
use crate::database::enums::migration_kind::MigrationKind;
use crate::database::errors::DatabaseError;
use crate::database::structs::migration_info::MigrationInfo;

const MIGRATION_SUFFIX: &str = ".sql";
const MIGRATION_DELIMITER: char = '_';
const BASELINE_TOKEN: &str = "baseline";

impl MigrationInfo {
    /// Parses `{version}_{database}[_baseline][_{description words}].sql`.
    ///
    /// Accepted shapes, where the version is any `_`-free token:
    /// - `{version}_db1`: migration without a description
    /// - `{version}_db1_create_t1`: migration described as "Create t1"
    /// - `{version}_db1_baseline`: baseline without a description
    /// - `{version}_db1_baseline_create_t1`: baseline described as "Create t1"
    ///
    /// The database segment cannot contain `_`; such names are read as the
    /// start of the description.
    pub fn parse(filename: &str) -> Result<MigrationInfo, DatabaseError> {
        let stem = filename.strip_suffix(MIGRATION_SUFFIX).unwrap_or(filename);
        let parts: Vec<&str> = stem.split(MIGRATION_DELIMITER).collect();
        if parts.len() < 2 {
            return Err(DatabaseError::Format { filename: filename.to_string() });
        }

        let version = parts[0].to_string();
        let database = parts[1].to_string();

        let (kind, description) = match parts.get(2) {
            Some(&BASELINE_TOKEN) => (MigrationKind::Baseline, parts[3..].join(" ")),
            Some(_) => (MigrationKind::Sql, parts[2..].join(" ")),
            None => (MigrationKind::Sql, String::new()),
        };

        let description = match (description.is_empty(), kind) {
            (false, _) => description,
            (true, MigrationKind::Baseline) => format!("Create {} baseline", database),
            (true, MigrationKind::Sql) => format!("Create {} migration", database),
        };

        Ok(MigrationInfo {
            version,
            namespace: database.clone(),
            database,
            kind,
            description: capitalize_first(&description),
            creator: String::new(),
        })
    }

    /// Same grammar as [`MigrationInfo::parse`], applied to the file name of `path`.
    pub fn parse_path(path: &Path) -> Result<MigrationInfo, DatabaseError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DatabaseError::Format { filename: path.display().to_string() })?;
        MigrationInfo::parse(filename)
    }

    /// Parses the file name of `path` and reads the statement it holds.
    pub fn load_file(path: &Path) -> Result<(MigrationInfo, String), DatabaseError> {
        let info = MigrationInfo::parse_path(path)?;
        let statement = std::fs::read_to_string(path).map_err(|error| DatabaseError::Read {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;
        Ok((info, statement))
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> MigrationInfo {
        self.creator = creator.into();
        self
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
