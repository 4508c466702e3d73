// Domain layer: vacancy model, salary rules and the ports adapters implement.

pub mod model;
pub mod ports;
pub mod salary;

pub use model::{Record, Vacancy};
pub use ports::{AddOutcome, ConfigProvider, VacancySource, VacancyStorage};
pub use salary::Salary;
