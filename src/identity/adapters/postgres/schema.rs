//! Diesel schema for user account persistence.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Lowercased email address, unique.
        #[max_length = 254]
        email -> Varchar,
        /// Lowercased account handle, unique.
        #[max_length = 32]
        username -> Varchar,
        /// Given name.
        #[max_length = 100]
        display_name -> Varchar,
        /// Surname.
        #[max_length = 100]
        surname -> Varchar,
        /// Consecutive-day login streak.
        streak -> Int4,
        /// Last recorded activity.
        last_active -> Timestamptz,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
