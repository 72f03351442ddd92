use serde::Serialize;
use std::collections::BTreeMap;

/// Storage client the handler depends on
const STORAGE_PACKAGE: &str = "@google-cloud/storage";
const STORAGE_VERSION: &str = "^5.8.5";

pub const HANDLER_FILE_NAME: &str = "index.js";
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Source of the HTTP handler
///
/// The exported function is named after the bucket and stores the JSON body of each
/// request as a new object in that bucket.
///
/// The name goes into the source verbatim, unlike [manifest] which JSON-escapes it.
/// By the time the source is generated the bucket exists, so the name is a valid bucket
/// name and has no quotes or backslashes to escape.
pub fn handler(bucket_name: &str) -> String {
    format!(
        "
const {{Storage}} = require('{STORAGE_PACKAGE}');
const storage = new Storage();

exports.{bucket_name} = async (req, res) => {{
    const data = req.body;
    const filename = `webhook-${{Date.now()}}.json`;
    const bucketName = '{bucket_name}';

    const file = storage.bucket(bucketName).file(filename);
    await file.save(JSON.stringify(data));

    res.status(200).send(`Successfully wrote ${{filename}} to bucket ${{bucketName}}`);
}};
"
    )
}

/// package.json of the function
#[derive(Serialize)]
struct Manifest<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    main: &'a str,
    dependencies: BTreeMap<&'a str, &'a str>,
}

/// Manifest declaring the package and its single dependency
///
/// Serialized with serde_json, so the name is always a valid JSON string.
pub fn manifest(bucket_name: &str) -> serde_json::Result<String> {
    let manifest = Manifest {
        name: bucket_name,
        version: "1.0.0",
        description: "A cloud function to write webhooks to GCS",
        main: HANDLER_FILE_NAME,
        dependencies: BTreeMap::from([(STORAGE_PACKAGE, STORAGE_VERSION)]),
    };

    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    Ok(json)
}
