use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 Vehicle Service Smoke Test".bright_blue().bold());
    println!("{}", "=============================".bright_blue());
    println!();

    let base_url = base_url_from_args()?;
    println!("{} {}", "🌐 Servidor:".bright_cyan(), base_url);
    println!();

    let smoke = SmokeTest::new(base_url);
    let steps = smoke.run().await;

    let failed = steps.iter().filter(|step| step.error.is_some()).count();
    println!();
    if failed == 0 {
        println!("{}", format!("✅ {} pasos OK", steps.len()).bright_green().bold());
        Ok(())
    } else {
        println!("{}", format!("❌ {} de {} pasos fallaron", failed, steps.len()).bright_red().bold());
        for step in steps.iter().filter(|step| step.error.is_some()) {
            println!("   - {}: {}", step.name, step.error.as_deref().unwrap_or_default());
        }
        std::process::exit(1);
    }
}

/// `--base-url <url>`, luego `VEHICLE_SERVICE_URL`, luego el valor por defecto
fn base_url_from_args() -> Result<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                let url = args.next().context("--base-url requiere un valor")?;
                return Ok(url.trim_end_matches('/').to_string());
            }
            "-h" | "--help" => {
                println!("Uso: testing-tool [--base-url <url>]");
                std::process::exit(0);
            }
            other => bail!("Argumento desconocido: {}", other),
        }
    }

    Ok(std::env::var("VEHICLE_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string())
}

struct StepResult {
    name: &'static str,
    error: Option<String>,
}

struct SmokeTest {
    client: Client,
    base_url: String,
    vin: String,
}

impl SmokeTest {
    fn new(base_url: String) -> Self {
        let vin = format!("SMOKE-{}", std::process::id());
        Self {
            client: Client::new(),
            base_url,
            vin,
        }
    }

    fn vehicle(&self) -> Value {
        json!({
            "vin": self.vin,
            "manufacturerName": "Ford",
            "description": "d",
            "horsePower": 100,
            "modelName": "Fiesta",
            "purchasePrice": 20000,
            "fuelType": "GASOLINE"
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn run(&self) -> Vec<StepResult> {
        let mut results = Vec::new();

        results.push(report("POST /vehicle → 201", self.create_returns_created().await));
        results.push(report("POST /vehicle (duplicado) → 409", self.duplicate_conflicts().await));
        results.push(report("GET /vehicle/{vin} → 200", self.get_returns_vehicle().await));
        results.push(report("POST /vehicle (horsePower 0) → 422", self.invalid_is_rejected().await));
        results.push(report("DELETE /vehicle/{vin} → 204", self.delete_returns_no_content().await));
        results.push(report("GET /vehicle/{vin} → 404", self.get_after_delete_is_not_found().await));

        results
    }

    async fn create_returns_created(&self) -> Result<()> {
        let response = self.client.post(self.url("/vehicle")).json(&self.vehicle()).send().await?;
        expect_status(response.status(), StatusCode::CREATED)?;
        let body: Value = response.json().await?;
        expect_same_vehicle(&body, &self.vehicle())
    }

    async fn duplicate_conflicts(&self) -> Result<()> {
        let response = self.client.post(self.url("/vehicle")).json(&self.vehicle()).send().await?;
        expect_status(response.status(), StatusCode::CONFLICT)?;
        let body: Value = response.json().await?;
        if body != json!({ "error": "VIN already exists" }) {
            bail!("body inesperado: {}", body);
        }
        Ok(())
    }

    async fn get_returns_vehicle(&self) -> Result<()> {
        let response = self.client.get(self.url(&format!("/vehicle/{}", self.vin))).send().await?;
        expect_status(response.status(), StatusCode::OK)?;
        let body: Value = response.json().await?;
        expect_same_vehicle(&body, &self.vehicle())
    }

    async fn invalid_is_rejected(&self) -> Result<()> {
        let mut vehicle = self.vehicle();
        vehicle["vin"] = json!(format!("{}-INVALID", self.vin));
        vehicle["horsePower"] = json!(0);

        let response = self.client.post(self.url("/vehicle")).json(&vehicle).send().await?;
        expect_status(response.status(), StatusCode::UNPROCESSABLE_ENTITY)?;
        let body: Value = response.json().await?;
        if body.get("horsePower").is_none() {
            bail!("falta el error de horsePower: {}", body);
        }
        Ok(())
    }

    async fn delete_returns_no_content(&self) -> Result<()> {
        let response = self.client.delete(self.url(&format!("/vehicle/{}", self.vin))).send().await?;
        expect_status(response.status(), StatusCode::NO_CONTENT)
    }

    async fn get_after_delete_is_not_found(&self) -> Result<()> {
        let response = self.client.get(self.url(&format!("/vehicle/{}", self.vin))).send().await?;
        expect_status(response.status(), StatusCode::NOT_FOUND)
    }
}

fn report(name: &'static str, outcome: Result<()>) -> StepResult {
    match outcome {
        Ok(()) => {
            println!("{} {}", "✅".bright_green(), name);
            StepResult { name, error: None }
        }
        Err(e) => {
            println!("{} {} - {}", "❌".bright_red(), name.bright_red(), e);
            StepResult { name, error: Some(e.to_string()) }
        }
    }
}

fn expect_status(actual: StatusCode, expected: StatusCode) -> Result<()> {
    if actual != expected {
        bail!("status {} (esperado {})", actual, expected);
    }
    Ok(())
}

fn expect_same_vehicle(actual: &Value, expected: &Value) -> Result<()> {
    for field in ["vin", "manufacturerName", "description", "horsePower", "modelName", "fuelType"] {
        if actual[field] != expected[field] {
            bail!("campo {} = {} (esperado {})", field, actual[field], expected[field]);
        }
    }
    if actual["purchasePrice"].as_f64() != expected["purchasePrice"].as_f64() {
        bail!("purchasePrice = {}", actual["purchasePrice"]);
    }
    Ok(())
}
