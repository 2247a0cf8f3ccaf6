mod day_plans;

pub use day_plans::PostgresDayPlanRepository;
