//! Element identifiers the dashboard components write into.

// KPI cards (value lives in a `.kpi-value` child)
pub const TOTAL_REQUESTS: &str = "totalRequests";
pub const COMPLETION_RATE: &str = "completionRate";
pub const TOP_WARD: &str = "topWard";
pub const TOP_SERVICE_TYPE: &str = "topServiceType";
pub const KPI_VALUE_SELECTOR: &str = ".kpi-value";

// Model quality
pub const ML_ACCURACY: &str = "mlAccuracy";
pub const ML_PRECISION: &str = "mlPrecision";
pub const ML_RECALL: &str = "mlRecall";
pub const ML_F1_SCORE: &str = "mlF1Score";

// Best performers
pub const BEST_SERVICE_TYPE: &str = "bestServiceType";
pub const BEST_WARD: &str = "bestWard";
pub const BEST_DIVISION: &str = "bestDivision";

// Status bar
pub const DATA_STATUS: &str = "dataStatus";
pub const LAST_UPDATED: &str = "lastUpdated";
pub const LOADING_OVERLAY: &str = "loadingOverlay";

// Chart containers
pub const TIME_SERIES_CHART: &str = "timeSeriesChart";
pub const WARD_CHART: &str = "wardChart";
pub const STATUS_CHART: &str = "statusChart";
pub const SERVICE_TYPES_CHART: &str = "serviceTypesChart";
pub const DIVISION_CHART: &str = "divisionChart";
pub const HOURLY_PATTERN_CHART: &str = "hourlyPatternChart";
pub const FEATURE_IMPORTANCE_CHART: &str = "featureImportanceChart";

// Search-assist lists
pub const SERVICE_TYPE_LIST: &str = "serviceTypeList";
pub const WARD_LIST: &str = "wardList";
pub const DIVISION_LIST: &str = "divisionList";

// Prediction form
pub const SERVICE_TYPE_INPUT: &str = "serviceType";
pub const WARD_INPUT: &str = "ward";
pub const DIVISION_INPUT: &str = "division";
pub const POSTAL_CODE_INPUT: &str = "predPostalCode";
pub const TIME_OF_DAY_INPUT: &str = "predTimeOfDay";
pub const DAY_OF_WEEK_INPUT: &str = "predDayOfWeek";
pub const PREDICT_BUTTON: &str = "predictButton";

// Prediction results
pub const PREDICTION_PLACEHOLDER: &str = "predictionPlaceholder";
pub const PREDICTION_RESULTS: &str = "predictionResults";
pub const PROBABILITY_PERCENT: &str = "probabilityPercent";
pub const OUTCOME_VALUE: &str = "outcomeValue";
pub const CONFIDENCE_VALUE: &str = "confidenceValue";
pub const INFLUENCING_FACTORS: &str = "influencingFactors";

// Error dialog
pub const ERROR_MODAL: &str = "errorModal";
pub const ERROR_MESSAGE: &str = "errorMessage";
pub const CLOSE_ERROR: &str = "closeError";

// Classes toggled by the components
pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
