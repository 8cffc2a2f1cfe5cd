#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::builder::*;
    use super::super::types::*;

    // -------------------------------------------------------------------------
    // Shape and contents
    // -------------------------------------------------------------------------

    #[test]
    fn build_4x4_has_16_cells() {
        let map = HeightmapBuilder::default().build_with_z(4, 4, 42.5).unwrap();
        assert_eq!(map.len(), 16);
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 4);
    }

    #[test]
    fn build_4x4_matches_reference_values() {
        let map = HeightmapBuilder::default().build_with_z(4, 4, 42.5).unwrap();
        assert_eq!(
            map.values(),
            &[134, 134, 132, 131, 133, 133, 133, 132, 132, 132, 132, 132, 130, 130, 131, 131]
        );
    }

    #[test]
    fn build_is_deterministic_for_fixed_z() {
        let builder = HeightmapBuilder::default();
        let a = builder.build_with_z(32, 24, 17.25).unwrap();
        let b = builder.build_with_z(32, 24, 17.25).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_z_slices_differ() {
        let builder = HeightmapBuilder::default();
        let a = builder.build_with_z(32, 32, 10.3).unwrap();
        let b = builder.build_with_z(32, 32, 61.7).unwrap();
        assert_ne!(a.values(), b.values());
    }

    #[test]
    fn index_maps_to_row_major_coordinates() {
        let map = HeightmapBuilder::default().build_with_z(7, 3, 5.5).unwrap();
        for (i, &v) in map.values().iter().enumerate() {
            assert_eq!(map.get(i % 7, i / 7), Some(v));
        }
        assert_eq!(map.get(7, 0), None);
        assert_eq!(map.get(0, 3), None);
    }

    #[test]
    fn max_height_is_largest_value() {
        let map = HeightmapBuilder::default().build_with_z(16, 16, 3.3).unwrap();
        let expected = map.values().iter().copied().max().unwrap();
        assert_eq!(map.max_height(), expected);
    }

    #[test]
    fn seeded_build_records_z_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let map = HeightmapBuilder::default().build(8, 8, &mut rng).unwrap();
        assert!((0.0..100.0).contains(&map.seed_z()));

        let mut again = ChaCha8Rng::seed_from_u64(5);
        let replay = HeightmapBuilder::default().build(8, 8, &mut again).unwrap();
        assert_eq!(map, replay);
    }

    // -------------------------------------------------------------------------
    // Octave schedule
    // -------------------------------------------------------------------------

    #[test]
    fn octave_qualities_grow_by_lacunarity() {
        let qualities: Vec<f64> = HeightmapBuilder::default().octave_qualities().collect();
        assert_eq!(qualities, vec![1.0, 5.0, 25.0, 125.0]);
        for pair in qualities.windows(2) {
            assert!(pair[1] > pair[0], "octave frequency must strictly increase");
            assert_eq!(pair[1] / pair[0], 5.0);
        }
    }

    #[test]
    fn octave_count_follows_builder() {
        let builder = HeightmapBuilder {
            octaves: 2,
            ..HeightmapBuilder::default()
        };
        assert_eq!(builder.octave_qualities().count(), 2);
    }

    // -------------------------------------------------------------------------
    // Overflow policy
    // -------------------------------------------------------------------------

    #[test]
    fn accumulate_saturates_instead_of_wrapping() {
        assert_eq!(accumulate_clamped(250, 10.0), 255);
        assert_eq!(accumulate_clamped(200, 300.0), 255);
        assert_eq!(accumulate_clamped(255, 0.9), 255);
    }

    #[test]
    fn accumulate_truncates_fraction() {
        assert_eq!(accumulate_clamped(10, 0.99), 10);
        assert_eq!(accumulate_clamped(10, 1.5), 11);
        assert_eq!(accumulate_clamped(0, 0.0), 0);
    }

    #[test]
    fn huge_amplitude_clamps_every_cell() {
        let normal = HeightmapBuilder::default().build_with_z(16, 16, 42.5).unwrap();
        let loud = HeightmapBuilder {
            amplitude: 1.0e6,
            ..HeightmapBuilder::default()
        }
        .build_with_z(16, 16, 42.5)
        .unwrap();

        assert_eq!(loud.max_height(), 255);
        // With wraparound some cells would fall below their normal height.
        for (l, n) in loud.values().iter().zip(normal.values()) {
            assert!(l >= n, "clamped value {l} below unamplified {n}");
        }
    }

    // -------------------------------------------------------------------------
    // Configuration errors
    // -------------------------------------------------------------------------

    #[test]
    fn zero_width_is_rejected() {
        let err = HeightmapBuilder::default().build_with_z(0, 4, 1.5).unwrap_err();
        assert_eq!(err, HeightmapError::InvalidDimensions { width: 0, height: 4 });
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(validate_dimensions(4, 0).is_err());
    }

    #[test]
    fn overflowing_size_is_rejected() {
        assert!(validate_dimensions(usize::MAX, 2).is_err());
    }

    #[test]
    fn rejected_build_draws_no_randomness() {
        use rand::Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(HeightmapBuilder::default().build(0, 0, &mut rng).is_err());
        let mut fresh = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn build_is_draw_slice_then_build_with_z() {
        let builder = HeightmapBuilder::default();
        let z = builder
            .draw_slice(8, 8, &mut ChaCha8Rng::seed_from_u64(21))
            .unwrap();
        let built = builder
            .build(8, 8, &mut ChaCha8Rng::seed_from_u64(21))
            .unwrap();
        assert_eq!(built.seed_z(), z);
        assert_eq!(built, builder.build_with_z(8, 8, z).unwrap());
    }

    #[test]
    fn draw_slice_rejects_before_drawing() {
        use rand::Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            HeightmapBuilder::default().draw_slice(4, 0, &mut rng),
            Err(HeightmapError::InvalidDimensions { width: 4, height: 0 })
        );
        assert_eq!(rng.gen::<u64>(), ChaCha8Rng::seed_from_u64(5).gen::<u64>());
    }

    #[test]
    fn error_message_names_dimensions() {
        let msg = format!("{}", HeightmapError::InvalidDimensions { width: 0, height: 9 });
        assert!(msg.contains("0x9"), "got: {msg}");
    }

    #[test]
    fn from_values_checks_cell_count() {
        let map = Heightmap::from_values(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(map.get(1, 1), Some(4));
        assert_eq!(
            Heightmap::from_values(2, 2, vec![1, 2, 3]).unwrap_err(),
            HeightmapError::ValueCountMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(Heightmap::from_values(0, 2, vec![]).is_err());
    }
}
