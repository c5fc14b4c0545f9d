//! Diesel schema for board persistence.

diesel::table! {
    /// Board section records.
    board_sections (id) {
        /// Section identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Section name.
        #[max_length = 100]
        name -> Varchar,
        /// Display color.
        #[max_length = 16]
        color -> Varchar,
        /// Board position, insertion order.
        position -> Int4,
        /// Role allowlist for editing tasks.
        allowed_roles -> Array<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    board_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Owning section.
        section_id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Urgency marker.
        #[max_length = 16]
        priority -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Assigned users.
        assignees -> Array<Uuid>,
        /// Users currently working on the task.
        working -> Array<Uuid>,
        /// When the first current worker started.
        working_started -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task comment records.
    task_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Author.
        author_id -> Uuid,
        /// Denormalized author display name.
        #[max_length = 100]
        author_name -> Varchar,
        /// Comment body.
        body -> Text,
        /// Posting timestamp.
        posted_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(board_sections, board_tasks, task_comments);
