use crate::error::Result;
use crate::models::{CleanedOrder, InputOrder};
use std::io::{Read, Write};

const CSV_HEADER: [&str; 7] = [
    "No",
    "ProductId",
    "MaterialId",
    "ModelId",
    "Qty",
    "UnitPrice",
    "TotalPrice",
];

/// 读取订单 JSON 数组
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<InputOrder>> {
    Ok(serde_json::from_reader(reader)?)
}

/// 输出清洗结果 JSON
pub fn write_json<W: Write>(orders: &[CleanedOrder], mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, orders)?;
    } else {
        serde_json::to_writer(&mut writer, orders)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// 导出清洗结果到 CSV (价格保留 2 位小数)
pub fn write_csv<W: Write>(orders: &[CleanedOrder], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for order in orders {
        writer.write_record(&[
            order.no.to_string(),
            order.product_id.clone(),
            order.material_id.clone(),
            order.model_id.clone(),
            order.qty.to_string(),
            format!("{:.2}", order.unit_price),
            format!("{:.2}", order.total_price),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 内置样例订单 (未指定输入文件时使用)
pub fn sample_orders() -> Vec<InputOrder> {
    vec![InputOrder {
        no: 1,
        platform_product_id: "FG0A-CLEAR-IPHONE16PROMAX".to_string(),
        qty: 2,
        unit_price: 50.0,
        total_price: 100.0,
    }]
}
