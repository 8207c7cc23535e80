use anyhow::Result;
use labkit_core::{dummy::ScriptedEnv, Env, ReplayBuffer, ReplayBufferConfig};
use labkit_wrappers::{
    discretization::discrete_cart_pole, registry::MOUNTAIN_CAR_1000, EvaluationEnv,
    EvaluationEnvConfig, ResetOptions,
};
use test_log::test;

type Transition = (usize, usize, f64, bool, usize);

#[test]
fn test_collect_and_evaluate() -> Result<()> {
    let inner = MOUNTAIN_CAR_1000.wrap(ScriptedEnv::new(vec![3, 5], 4).scale(0.1));
    let env = discrete_cart_pole(inner, None)?;
    let config = EvaluationEnvConfig::default()
        .seed(Some(0))
        .evaluate_for(4)
        .report_each(2)
        .report_verbose(true);
    let mut env = EvaluationEnv::new(env, config)?;

    let buffer_config = ReplayBufferConfig::default().capacity(Some(10)).seed(1);
    let mut buffer = ReplayBuffer::<Transition>::from_config(&buffer_config)?;

    // Training episodes fill the buffer; 3 + 5 + 3 + 5 transitions.
    for _ in 0..4 {
        let mut state = env.reset()?;
        loop {
            let step = env.step(&0)?;
            buffer.append((state, 0, step.reward, step.is_done(), step.obs));
            if step.is_done() {
                break;
            }
            state = step.obs;
        }
    }
    assert_eq!(buffer.len(), 10);
    assert!(buffer.get(-1)?.3);

    let batch = buffer.sample(32, true)?;
    assert_eq!(batch.len(), 32);
    assert!(batch.iter().all(|tr| tr.2 == 1.0));
    let distinct = buffer.sample(10, false)?;
    assert_eq!(distinct.len(), 10);

    // Evaluation.
    let mut options = ResetOptions::default().start_evaluation(true);
    while env.evaluation_summary().is_none() {
        env.reset_with(options)?;
        options = ResetOptions::default();
        while !env.step(&0)?.is_done() {}
    }
    let summary = env.evaluation_summary().unwrap();
    assert_eq!(summary.mean, 4.0);
    assert_eq!(summary.std, 1.0);
    assert_eq!(env.episode(), 8);
    Ok(())
}
