//! Integration tests for NEUROGEN

use neurogen::config::GeneConfig;
use neurogen::{
    Activation, ActivationKind, Config, Genetic, Layer, Network, NetworkBuilder, NetworkError,
    Neuron, RandomGenerator,
};

fn builder() -> NetworkBuilder {
    NetworkBuilder::new(5)
        .layer(6, &ActivationKind::ALL)
        .layer(4, &[ActivationKind::ExponentialLinearUnit])
        .layer(2, &[ActivationKind::Linear])
}

/// Every gene of a network in traversal order, as raw bits.
fn genes(net: &Network) -> Vec<u64> {
    let mut out = Vec::new();
    for layer in net.layers() {
        for unit in layer.units() {
            out.push(unit.bias().to_bits());
            if let Some(leakage) = unit.activation().leakage() {
                out.push(leakage.to_bits());
            }
            out.extend(unit.weights().iter().map(|w| w.to_bits()));
        }
    }
    out
}

#[test]
fn test_evolution_cycle() {
    let config = Config::default();
    let mut rng = RandomGenerator::seeded(12345, config.genes).unwrap();
    let builder = builder();

    let mut population: Vec<Network> = (0..8).map(|_| builder.generate(&mut rng)).collect();
    let inputs = [0.5, -0.25, 1.0, 0.0, -1.5];

    for _ in 0..20 {
        let next: Vec<Network> = population
            .chunks(2)
            .flat_map(|pair| {
                let child = pair[0].crossover(&pair[1], &mut rng).unwrap();
                vec![child.mutate(0.1, &mut rng), pair[0].mutate(0.1, &mut rng)]
            })
            .collect();
        population = next;
    }

    assert_eq!(population.len(), 8);
    for net in &population {
        assert_eq!(net.topology(), vec![6, 4, 2]);
        assert!(net.is_valid());
        assert_eq!(net.fire(&inputs).unwrap().len(), 2);
    }
}

#[test]
fn test_reproducibility() {
    let run = |seed: u64| {
        let mut rng = RandomGenerator::seeded(seed, GeneConfig::default()).unwrap();
        let a = builder().generate(&mut rng);
        let b = builder().generate(&mut rng);
        a.crossover(&b, &mut rng).unwrap().mutate(0.3, &mut rng)
    };

    assert!(run(99999).identical(&run(99999)));
    assert!(!run(99999).identical(&run(11111)));
}

#[test]
fn test_mutate_rate_zero_keeps_every_gene() {
    let mut rng = RandomGenerator::seeded(1, GeneConfig::default()).unwrap();
    let net = builder().generate(&mut rng);

    assert_eq!(genes(&net.mutate(0.0, &mut rng)), genes(&net));
}

#[test]
fn test_mutate_rate_one_replaces_every_gene() {
    let mut rng = RandomGenerator::seeded(2, GeneConfig::default()).unwrap();
    let net = builder().generate(&mut rng);
    let before = genes(&net);

    let mut unchanged = 0;
    for _ in 0..10 {
        let after = genes(&net.mutate(1.0, &mut rng));
        assert_eq!(after.len(), before.len());
        unchanged += after.iter().zip(&before).filter(|(a, b)| a == b).count();
    }

    assert_eq!(unchanged, 0);
}

#[test]
fn test_crossover_gene_provenance() {
    let mut rng = RandomGenerator::seeded(3, GeneConfig::default()).unwrap();
    let a = builder().generate(&mut rng);
    let b = builder().generate(&mut rng);

    let child = a.crossover(&b, &mut rng).unwrap();
    let (mut from_a, mut from_b) = (0, 0);

    for (l, layer) in child.layers().iter().enumerate() {
        for (u, unit) in layer.units().iter().enumerate() {
            let pa = &a.layers()[l].units()[u];
            let pb = &b.layers()[l].units()[u];

            assert!(unit.bias() == pa.bias() || unit.bias() == pb.bias());
            assert!(unit.activation() == pa.activation() || unit.activation() == pb.activation());
            assert_eq!(unit.fan_in(), pa.fan_in());

            for (i, w) in unit.weights().iter().enumerate() {
                let (wa, wb) = (pa.weights()[i], pb.weights()[i]);
                assert!(*w == wa || *w == wb, "layer {} unit {} weight {}", l, u, i);
                from_a += usize::from(*w == wa);
                from_b += usize::from(*w == wb);
            }
        }
    }

    assert!(from_a > 0 && from_b > 0);
}

#[test]
fn test_shape_errors() {
    let unit = Neuron::new(0.0, vec![1.0, 2.0, 3.0], Activation::Linear);
    assert_eq!(
        unit.fire(&[1.0; 4]),
        Err(NetworkError::DimensionMismatch { expected: 3, found: 4 })
    );

    let mut rng = RandomGenerator::seeded(4, GeneConfig::default()).unwrap();
    let net = builder().generate(&mut rng);
    assert_eq!(
        net.fire(&[1.0; 4]),
        Err(NetworkError::InputSizeMismatch { expected: 5, found: 4 })
    );

    let other = Neuron::new(0.0, vec![1.0; 4], Activation::Linear);
    assert!(matches!(
        unit.crossover(&other, &mut rng),
        Err(NetworkError::TopologyMismatch(_))
    ));
}

#[test]
fn test_json_roundtrip_with_special_values() {
    let hidden = Layer::new(vec![
        Neuron::new(
            f64::NAN,
            vec![f64::INFINITY, -2.5],
            Activation::ExponentialLinearUnit { leakage: 0.01 },
        ),
        Neuron::new(0.75, vec![f64::NEG_INFINITY, f64::MIN_POSITIVE], Activation::Linear),
    ])
    .unwrap();
    let output = Layer::new(vec![Neuron::new(
        1.0,
        vec![0.5, f64::MAX],
        Activation::ExponentialLinearUnit { leakage: f64::INFINITY },
    )])
    .unwrap();
    let net = Network::new(2, vec![hidden, output]).unwrap();

    let json = net.to_json().unwrap();
    assert!(json.contains("\"NaN\""));
    assert!(json.contains("\"-Infinity\""));

    let decoded = Network::from_json(&json).unwrap();
    assert!(decoded.identical(&net));

    let pretty = Network::from_json(&net.to_json_pretty().unwrap()).unwrap();
    assert!(pretty.identical(&net));
}

#[test]
fn test_json_from_external_source() {
    let json = r#"{
        "inputSize": 2,
        "layers": [
            { "neurons": [
                { "bias": 1, "weights": [2, -1], "activation": "LINEAR" },
                { "bias": 0, "weights": [1, 1], "activation": "EXPONENTIAL_LINEAR_UNIT", "leakage": 0.5 }
            ] },
            { "neurons": [
                { "bias": 0, "weights": [1, 1], "activation": "LINEAR" }
            ] }
        ]
    }"#;

    let net = Network::from_json(json).unwrap();
    assert_eq!(net.input_size(), 2);
    assert_eq!(net.topology(), vec![2, 1]);

    // hidden = [1 + 2*3 - 4, elu(3 + 4)] = [3, 7]
    assert_eq!(net.fire(&[3.0, 4.0]).unwrap(), vec![10.0]);
}

#[test]
fn test_file_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    let config = Config::default();
    let mut rng = RandomGenerator::seeded(5, config.genes).unwrap();
    let net = NetworkBuilder::from_config(&config.network).generate(&mut rng);

    std::fs::write(&path, net.to_json_pretty().unwrap()).unwrap();
    let loaded = Network::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(loaded, net);
    let inputs = vec![0.5; 200];
    assert_eq!(loaded.fire(&inputs).unwrap(), net.fire(&inputs).unwrap());
}

#[test]
fn test_parallel_fire_matches_sequential() {
    let config = Config::default();
    let mut rng = RandomGenerator::seeded(6, config.genes).unwrap();
    let net = NetworkBuilder::from_config(&config.network).generate(&mut rng);

    for _ in 0..10 {
        let inputs: Vec<f64> = (0..200).map(|_| rng.random()).collect();
        assert_eq!(net.fire_parallel(&inputs).unwrap(), net.fire(&inputs).unwrap());
    }
}
