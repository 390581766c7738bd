#[derive(Debug, Clone)]
pub enum Message {
    // === API RESPONSE MESSAGES ===
    TasksFetched,
    TasksSorted,
    TasksLimited,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    OnlyPostAllowed,
    InvalidRequestBody(String), // rejection text
    InternalError,

    // === TASK MESSAGES ===
    TaskCreatedWithId(i64),
    TaskUpdatedWithId(i64),
    TaskDeletedWithId(i64),
    TaskToggled { id: i64, completed: bool },
    TaskNotFoundWithId(i64),
    TasksNotFound,
    TasksHeader,
    TasksSortedHeader,
    TasksDueTodayHeader,
    InvalidDueDate(String),
    NoChangesRequested,

    // === SERVER MESSAGES ===
    ServerStarting(String),  // address
    ServerListening(String), // address
    ServerShuttingDown,
    ServerStopped,
    ShutdownSignalFailed(String), // error
    RequestFailed { status: u16, message: String },

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    ConfigModuleClient,
    InvalidPort(String),

    // === DATABASE MESSAGES ===
    DbOpened(String), // path

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate(u32), // latest version
    MigrationHistory,

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptServerDatabase,
    PromptClientUrl,
}
