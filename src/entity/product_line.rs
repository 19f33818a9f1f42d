use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    #[fieldx(get(copy(off)))]
    pub name:          String,
    pub profit_margin: f64,
    pub units_sold:    u64,
    pub revenue:       f64,
}
