use super::*;

#[test]
fn test_ricker_peak_and_symmetry() {
    // Odd point count puts a sample exactly at t = 0.
    let wavelet = ricker_wavelet(25.0, 101, 0.1);
    assert_eq!(wavelet.len(), 101);
    assert!((wavelet[50] - 1.0).abs() < 1e-12);
    for i in 0..50 {
        assert!((wavelet[i] - wavelet[100 - i]).abs() < 1e-12);
    }
    assert!(wavelet.iter().all(|&v| v <= 1.0 + 1e-12));
}

#[test]
fn test_ricker_side_lobes_are_negative() {
    let f = 25.0;
    // Minimum of the Ricker wavelet sits at t = sqrt(3/2) / (pi f).
    let t_min = (1.5f64).sqrt() / (PI * f);
    let wavelet = ricker_wavelet(f, 3, t_min);
    assert!((wavelet[0] - wavelet[2]).abs() < 1e-12);
    assert!((wavelet[0] - (-2.0 * (-1.5f64).exp())).abs() < 1e-12);
}

#[test]
fn test_convolve_same_matches_centered_full() {
    // numpy.convolve([1, 2, 3, 4, 5], [1, 0, -1], "same") == [2, 2, 2, 2, -4]
    let out = convolve_same(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 0.0, -1.0]);
    assert_eq!(out, vec![2.0, 2.0, 2.0, 2.0, -4.0]);
}

#[test]
fn test_convolve_same_even_kernel() {
    // numpy.convolve([1, 2, 3], [1, 1, 1, 1], "same") == [3, 6, 6, 5]
    let out = convolve_same(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0, 1.0]);
    assert_eq!(out, vec![3.0, 6.0, 6.0, 5.0]);
}

#[test]
fn test_convolve_same_centers_impulse() {
    let mut spike = vec![0.0; 11];
    spike[5] = 1.0;
    let kernel = [0.25, 0.5, 0.25];
    let out = convolve_same(&spike, &kernel);
    assert_eq!(out[4..7], [0.25, 0.5, 0.25]);
}

#[test]
fn test_reflectivity_has_at_most_count_spikes() {
    let mut rng = StdRng::seed_from_u64(3);
    let trace = sparse_reflectivity(&mut rng, 500, 5);
    let spikes = trace.iter().filter(|&&v| v != 0.0).count();
    assert!((1..=5).contains(&spikes));
}

#[test]
fn test_section_shape_and_reproducibility() {
    let config = SectionConfig::default();
    let a = generate_section(&config).unwrap();
    let b = generate_section(&config).unwrap();

    assert_eq!(a.shape(), (500, 100));
    assert_eq!(a, b);
    assert!(a.abs_max().unwrap() > 0.0);

    let other = generate_section(&SectionConfig { seed: 7, ..config }).unwrap();
    assert_ne!(a, other);
}

#[test]
fn test_short_traces_keep_configured_length() {
    let config = SectionConfig {
        traces: 3,
        samples: 40,
        ..SectionConfig::default()
    };
    let section = generate_section(&config).unwrap();
    assert_eq!(section.shape(), (40, 3));
}

#[test]
fn test_invalid_section_config() {
    let config = SectionConfig {
        traces: 0,
        ..SectionConfig::default()
    };
    assert!(matches!(generate_section(&config), Err(Error::InvalidConfig(_))));

    let config = SectionConfig {
        dominant_frequency: -5.0,
        ..SectionConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_trace_window_selects_columns() {
    let section = Grid2::from_fn(10, 4, |col, row| (col * 100 + row) as f64);
    let window = trace_window(&section, TraceRange::new(2, 5)).unwrap();

    assert_eq!(window.shape(), (4, 3));
    assert_eq!(window[(0, 0)], 200.0);
    assert_eq!(window[(2, 3)], 403.0);
}

#[test]
fn test_trace_window_rejects_bad_ranges() {
    let section = Grid2::new_filled(10, 4, 0.0);
    assert!(trace_window(&section, TraceRange::new(5, 5)).is_err());
    assert!(trace_window(&section, TraceRange::new(6, 2)).is_err());
    assert!(trace_window(&section, TraceRange::new(0, 11)).is_err());
    assert!(trace_window(&section, TraceRange::full(10)).is_ok());
}
