//! Diesel schema for task persistence.

diesel::table! {
    /// One row per task, keyed by the content-addressed identifier.
    tasks (id) {
        /// SHA-256 hex digest of the task name.
        #[max_length = 64]
        id -> Varchar,
        /// Task name; unique.
        name -> Text,
        /// Optional priority (`urgent`, `important`, `unimportant`).
        #[max_length = 20]
        priority -> Nullable<Varchar>,
        /// Optional expiration timestamp.
        expiration_date -> Nullable<Timestamptz>,
        /// Optional completion flag.
        finished -> Nullable<Bool>,
        /// Optional reminder flag.
        remind -> Nullable<Bool>,
    }
}
