use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::FactoryId;
use crate::types::FactoryStatus;

#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssemblyLine {
    /// Global line number, unique across all factories of a generator.
    pub id:          u32,
    pub factory_id:  FactoryId,
    /// "Line A", "Line B", … within the owning factory.
    #[fieldx(get(copy(off)))]
    pub name:        String,
    pub status:      FactoryStatus,
    /// Cars per hour.
    pub output_rate: u32,
    /// Cars per hour.
    pub target_rate: u32,
}

impl AssemblyLine {
    /// Output relative to target, `1.0` meaning the line is on target.
    pub fn efficiency(&self) -> f64 {
        if self.target_rate == 0 {
            return 0.0;
        }
        self.output_rate as f64 / self.target_rate as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_efficiency() {
        let line = AssemblyLine {
            id:          1,
            factory_id:  1,
            name:        "Line A".to_string(),
            status:      FactoryStatus::Running,
            output_rate: 24,
            target_rate: 30,
        };
        assert_eq!(line.efficiency(), 0.8);
        assert_eq!(line.name(), "Line A");
        assert_eq!(line.output_rate(), 24);
    }
}
