use rand::Rng;

use super::sampling::scaled;
use super::sampling::weighted_status;
use super::sampling::FACTORY_STATUS_WEIGHTS;
use super::sampling::LINE_STATUS_WEIGHTS;
use crate::entity::AssemblyLine;
use crate::entity::Factory;
use crate::types::FactoryId;

pub(crate) struct Site {
    pub name:      &'static str,
    pub location:  &'static str,
    pub latitude:  f64,
    pub longitude: f64,
}

/// The fixed set of production sites. A factory's id is its position here plus one.
pub(crate) const SITES: [Site; 10] = [
    Site {
        name:      "Detroit Assembly",
        location:  "Detroit, MI",
        latitude:  42.3314,
        longitude: -83.0458,
    },
    Site {
        name:      "Munich Production",
        location:  "Munich, Germany",
        latitude:  48.1351,
        longitude: 11.5820,
    },
    Site {
        name:      "Tokyo Manufacturing",
        location:  "Tokyo, Japan",
        latitude:  35.6762,
        longitude: 139.6503,
    },
    Site {
        name:      "São Paulo Plant",
        location:  "São Paulo, Brazil",
        latitude:  -23.5505,
        longitude: -46.6333,
    },
    Site {
        name:      "Shanghai Factory",
        location:  "Shanghai, China",
        latitude:  31.2304,
        longitude: 121.4737,
    },
    Site {
        name:      "Mumbai Assembly",
        location:  "Mumbai, India",
        latitude:  19.0760,
        longitude: 72.8777,
    },
    Site {
        name:      "Mexico City Plant",
        location:  "Mexico City, Mexico",
        latitude:  19.4326,
        longitude: -99.1332,
    },
    Site {
        name:      "Seoul Production",
        location:  "Seoul, South Korea",
        latitude:  37.5665,
        longitude: 126.9780,
    },
    Site {
        name:      "Birmingham Factory",
        location:  "Birmingham, UK",
        latitude:  52.4862,
        longitude: -1.8904,
    },
    Site {
        name:      "Barcelona Assembly",
        location:  "Barcelona, Spain",
        latitude:  41.3851,
        longitude: 2.1734,
    },
];

pub(crate) fn factories<R: Rng + ?Sized>(rng: &mut R) -> Vec<Factory> {
    SITES
        .iter()
        .enumerate()
        .map(|(idx, site)| {
            let capacity = rng.random_range(800..=1500);
            let current = scaled(rng, capacity, 0.7, 0.95);
            Factory {
                id:                  idx as FactoryId + 1,
                name:                site.name.to_string(),
                location:            site.location.to_string(),
                latitude:            site.latitude,
                longitude:           site.longitude,
                production_capacity: capacity,
                current_production:  current,
                efficiency:          rng.random_range(0.82..0.95),
                status:              weighted_status(rng, &FACTORY_STATUS_WEIGHTS),
            }
        })
        .collect()
}

/// Two to four lines per factory, numbered globally from 1 in roster order.
pub(crate) fn assembly_lines<R: Rng + ?Sized>(rng: &mut R, factories: &[Factory]) -> Vec<AssemblyLine> {
    let mut lines = Vec::with_capacity(factories.len() * 4);

    for factory in factories {
        let count: u8 = rng.random_range(2..=4);
        for letter in 0..count {
            let target = rng.random_range(15..=30);
            let output = scaled(rng, target, 0.8, 1.0).max(1);
            lines.push(AssemblyLine {
                id:          lines.len() as u32 + 1,
                factory_id:  factory.id,
                name:        format!("Line {}", (b'A' + letter) as char),
                status:      weighted_status(rng, &LINE_STATUS_WEIGHTS),
                output_rate: output,
                target_rate: target,
            });
        }
    }

    lines
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn roster_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let factories = factories(&mut rng);
        assert_eq!(factories.len(), 10);
        assert_eq!(factories[0].name(), "Detroit Assembly");
        assert_eq!(factories[9].id(), 10);

        for factory in &factories {
            assert!((800..=1500).contains(&factory.production_capacity()));
            assert!(factory.current_production() >= factory.production_capacity() * 7 / 10 - 1);
            assert!(factory.current_production() <= factory.production_capacity());
            assert!((0.82..0.95).contains(&factory.efficiency()));
        }
    }

    #[test]
    fn lines_per_factory() {
        let mut rng = StdRng::seed_from_u64(2);
        let factories = factories(&mut rng);
        let lines = assembly_lines(&mut rng, &factories);

        for factory in &factories {
            let names = lines
                .iter()
                .filter(|l| l.factory_id() == factory.id())
                .map(|l| l.name().as_str())
                .collect::<Vec<_>>();
            assert!((2..=4).contains(&names.len()));
            assert_eq!(names[0], "Line A");
            assert_eq!(names[1], "Line B");
        }

        for (idx, line) in lines.iter().enumerate() {
            assert_eq!(line.id() as usize, idx + 1);
            assert!(line.output_rate() > 0);
            assert!(line.output_rate() <= line.target_rate());
            assert!((15..=30).contains(&line.target_rate()));
        }
    }
}
