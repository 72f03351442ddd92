use hookbucket::config::ProvisionConfig;
use hookbucket::files::LocalFs;
use hookbucket::process::{CommandOutput, CommandRunner, Invocation};
use hookbucket::request::DeploymentRequest;
use hookbucket::workflow::Workflow;
use hookbucket::writer::Writer;
use mockall::Sequence;
use std::io;

const URL: &str = "https://region-project.cloudfunctions.net/mybucket";

mockall::mock! {
    Runner {}

    impl CommandRunner for Runner {
        fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
    }
}

fn command_line(invocation: &Invocation) -> String {
    invocation.to_string()
}

#[test]
fn provisions_bucket_and_function_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let source_dir = dir.path().join("webhook-function");
    let handler = source_dir.join("index.js");
    let manifest = source_dir.join("package.json");

    let config = ProvisionConfig {
        source_dir: source_dir.clone(),
        ..Default::default()
    };

    let mut runner = MockRunner::new();
    let mut seq = Sequence::new();

    runner
        .expect_run()
        .withf(|i| command_line(i) == "gcloud version")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::success("Google Cloud SDK 400.0.0\n")));

    runner
        .expect_run()
        .withf(|i| command_line(i) == "gcloud config list account --format value(core.account)")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::success("dev@example.com\n")));

    runner
        .expect_run()
        .withf(|i| command_line(i) == "gsutil mb gs://mybucket")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::success("")));

    let deploy_source = source_dir.to_string_lossy().to_string();

    runner
        .expect_run()
        .withf(move |i| {
            i.program == "gcloud"
                && i.args[..3] == ["functions", "deploy", "mybucket"]
                && i.args.contains(&"--trigger-http".to_string())
                && i.args.contains(&"--allow-unauthenticated".to_string())
                && i.args.last() == Some(&deploy_source)
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| {
            // Both files must be in place before the deploy starts
            assert!(handler.is_file());
            assert!(manifest.is_file());
            Ok(CommandOutput::success(""))
        });

    runner
        .expect_run()
        .withf(|i| {
            command_line(i) == "gcloud functions describe mybucket --format value(httpsTrigger.url)"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CommandOutput::success(&format!("{URL}\n"))));

    let writer = Writer::new(true);
    let workflow = Workflow::new(&runner, &LocalFs, &config, &writer);

    let deployment = workflow
        .run(|| DeploymentRequest::prompt(&mut "mybucket\n".as_bytes(), &mut io::sink()))
        .unwrap();

    assert_eq!(deployment.url.as_deref(), Some(URL));
    assert_eq!(deployment.request, DeploymentRequest::new("mybucket"));

    let manifest = std::fs::read_to_string(source_dir.join("package.json")).unwrap();
    let handler = std::fs::read_to_string(source_dir.join("index.js")).unwrap();
    assert!(manifest.contains("\"name\": \"mybucket\""));
    assert!(handler.contains("exports.mybucket ="));
}

#[test]
fn rerun_over_existing_sources_succeeds() {
    let dir = tempfile::tempdir().unwrap();

    let config = ProvisionConfig {
        source_dir: dir.path().join("webhook-function"),
        ..Default::default()
    };

    let writer = Writer::new(true);
    let runner = MockRunner::new();
    let workflow = Workflow::new(&runner, &LocalFs, &config, &writer);
    let request = DeploymentRequest::new("mybucket");

    workflow.generate_function_source(&request).unwrap();
    workflow.generate_function_source(&request).unwrap();
}
