/// Parses a `PRODUCT=QUANTITY` order line.
pub fn parse_item(input: &str) -> Result<(String, u32), String> {
    let (product, quantity) = input
        .split_once('=')
        .ok_or_else(|| format!("Invalid item {input:?}, expected PRODUCT=QUANTITY"))?;

    let product = product.trim();
    if product.is_empty() {
        return Err(format!("Invalid item {input:?}, product is empty"));
    }

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid quantity in {input:?}"))?;

    Ok((product.to_owned(), quantity))
}
