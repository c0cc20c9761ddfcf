use anyhow::{ensure, Context};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::models::{GroupSummary, TestResult};

/// Reference weekly study hours the Poly group is tested against.
pub const BENCHMARK_WEEKLY_HOURS: f64 = 15.5;

pub fn mean(values: &[f64]) -> anyhow::Result<f64> {
    ensure!(!values.is_empty(), "mean requires at least one value");
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with Bessel's correction (n-1 denominator).
pub fn stddev_sample(values: &[f64]) -> anyhow::Result<f64> {
    ensure!(
        values.len() >= 2,
        "sample standard deviation requires at least 2 values, got {}",
        values.len()
    );
    let center = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - center).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Ok(variance.sqrt())
}

pub fn summarize(label: &str, values: &[f64]) -> anyhow::Result<GroupSummary> {
    Ok(GroupSummary {
        n: values.len(),
        mean: mean(values).with_context(|| format!("group {label}"))?,
        sd: stddev_sample(values).with_context(|| format!("group {label}"))?,
    })
}

fn t_cdf(t: f64, df: f64) -> anyhow::Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .with_context(|| format!("invalid Student-t degrees of freedom {df}"))?;
    Ok(dist.cdf(t))
}

/// Two-tailed one-sample t-test of a group mean against a fixed benchmark.
pub fn one_sample_t_test(group: &GroupSummary, benchmark: f64) -> anyhow::Result<TestResult> {
    ensure!(
        group.n >= 2,
        "one-sample t-test requires at least 2 observations, got {}",
        group.n
    );
    let n = group.n as f64;
    let statistic = (group.mean - benchmark) / (group.sd / n.sqrt());
    let df = n - 1.0;
    let p_value = 2.0 * (1.0 - t_cdf(statistic.abs(), df)?);
    Ok(TestResult {
        statistic,
        df,
        p_value,
    })
}

/// One-tailed Welch two-sample t-test, alternative: mean(a) > mean(b).
/// Degrees of freedom use the Welch-Satterthwaite approximation and may be
/// fractional.
pub fn welch_t_test(a: &GroupSummary, b: &GroupSummary) -> anyhow::Result<TestResult> {
    ensure!(
        a.n >= 2 && b.n >= 2,
        "Welch t-test requires at least 2 observations per group, got {} and {}",
        a.n,
        b.n
    );
    let (na, nb) = (a.n as f64, b.n as f64);
    let var_a = a.sd.powi(2) / na;
    let var_b = b.sd.powi(2) / nb;
    let se = (var_a + var_b).sqrt();
    let statistic = (a.mean - b.mean) / se;
    let df = (var_a + var_b).powi(2) / (var_a.powi(2) / (na - 1.0) + var_b.powi(2) / (nb - 1.0));
    // upper tail only: a negative statistic correctly yields p >= 0.5
    let p_value = 1.0 - t_cdf(statistic, df)?;
    Ok(TestResult {
        statistic,
        df,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn known_sample_reproduces_mean_and_sd() {
        let weekly = [10.0, 12.0, 14.0];
        assert_eq!(mean(&weekly).unwrap(), 12.0);
        assert!(close(stddev_sample(&weekly).unwrap(), 2.0, 1e-12));
    }

    #[test]
    fn small_samples_are_rejected_explicitly() {
        assert!(mean(&[]).is_err());
        assert!(stddev_sample(&[5.0]).is_err());
        assert!(summarize("Poly", &[5.0]).is_err());
        let single = GroupSummary {
            n: 1,
            mean: 15.0,
            sd: 0.0,
        };
        assert!(one_sample_t_test(&single, BENCHMARK_WEEKLY_HOURS).is_err());
        let pair = GroupSummary {
            n: 2,
            mean: 15.0,
            sd: 1.0,
        };
        assert!(welch_t_test(&single, &pair).is_err());
    }

    #[test]
    fn one_sample_test_matches_reference_values() {
        let poly = summarize("Poly", &[14.0, 16.0, 15.0, 13.0, 17.0]).unwrap();
        assert_eq!(poly.n, 5);
        assert!(close(poly.mean, 15.0, 1e-12));
        assert!(close(poly.sd, 1.5811, 1e-4));

        let result = one_sample_t_test(&poly, BENCHMARK_WEEKLY_HOURS).unwrap();
        assert!(close(result.statistic, -0.7071, 1e-4));
        assert_eq!(result.df, 4.0);
        assert!(close(result.p_value, 0.5185, 1e-3));
    }

    #[test]
    fn welch_df_stays_within_satterthwaite_bounds() {
        let jc = summarize("JC", &[20.0, 22.0, 24.0, 26.0]).unwrap();
        let poly = summarize("Poly", &[14.0, 15.0, 16.0, 17.0, 18.0, 19.0]).unwrap();
        let result = welch_t_test(&jc, &poly).unwrap();

        let lower = (jc.n.min(poly.n) - 1) as f64;
        let upper = (jc.n + poly.n - 2) as f64;
        assert!(result.df > lower && result.df < upper);
        assert!(close(result.statistic, 4.3333, 1e-4));
        assert!(close(result.df, 5.0931, 1e-3));
    }

    #[test]
    fn welch_p_decreases_as_mean_gap_widens() {
        let poly = GroupSummary {
            n: 6,
            mean: 16.5,
            sd: 1.8708,
        };
        let near = GroupSummary {
            n: 4,
            mean: 17.5,
            sd: 2.5820,
        };
        let far = GroupSummary {
            n: 4,
            mean: 23.0,
            sd: 2.5820,
        };
        let p_near = welch_t_test(&near, &poly).unwrap().p_value;
        let p_far = welch_t_test(&far, &poly).unwrap().p_value;
        assert!(p_far < p_near);
    }

    #[test]
    fn negative_welch_statistic_fails_the_directional_alternative() {
        let behind = GroupSummary {
            n: 5,
            mean: 14.0,
            sd: 2.0,
        };
        let ahead = GroupSummary {
            n: 5,
            mean: 18.0,
            sd: 2.0,
        };
        let result = welch_t_test(&behind, &ahead).unwrap();
        assert!(result.statistic < 0.0);
        assert!(result.p_value > 0.5);
    }
}
